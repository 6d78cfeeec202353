//! Host configuration
//!
//! Defaults describe the production deployment: Atkinson Hyperlegible served
//! from Google Fonts and an asset store on the same host as the UI.

/// Regular weight of the label font
pub const DEFAULT_REGULAR_FONT: &str = "https://fonts.gstatic.com/s/atkinsonhyperlegible/v12/9Bt23C1KxNDXMspQ1lPyU89-1h6ONRlW45GE5Q.ttf";

/// Bold weight of the label font
pub const DEFAULT_BOLD_FONT: &str = "https://fonts.gstatic.com/s/atkinsonhyperlegible/v12/9Bt73C1KxNDXMspQ1lPyU89-1h6ONRlW45G8WbcNcw.ttf";

pub const DEFAULT_FONT_FAMILY: &str = "Atkinson Hyperlegible";

pub const DEFAULT_ASSET_BASE_URL: &str = "http://localhost:8080";

pub const DEFAULT_PICKER_COMMAND: &str = "zenity --file-selection";

/// Where the two embeddable font weights come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSources {
    /// Family name both faces are registered under
    pub family: String,
    /// URL or filesystem path of the weight-400 face
    pub regular: String,
    /// URL or filesystem path of the weight-700 face
    pub bold: String,
}

impl Default for FontSources {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            regular: DEFAULT_REGULAR_FONT.to_string(),
            bold: DEFAULT_BOLD_FONT.to_string(),
        }
    }
}

/// Everything the host needs to know before it starts answering messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub fonts: FontSources,
    /// Scheme and authority the asset store is reached at
    pub asset_base_url: String,
    /// Command line of the external file picker; the selected path is read
    /// from its stdout
    pub picker_command: String,
    /// Start fetching fonts as soon as the host starts
    pub preload_fonts: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            fonts: FontSources::default(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            picker_command: DEFAULT_PICKER_COMMAND.to_string(),
            preload_fonts: true,
        }
    }
}

impl HostConfig {
    /// Checks the fields that would otherwise only fail on first use
    pub fn validate(&self) -> crate::Result<()> {
        if self.fonts.family.trim().is_empty() {
            return Err(crate::HostError::Config("font family must not be empty".into()));
        }
        if !(self.asset_base_url.starts_with("http://")
            || self.asset_base_url.starts_with("https://"))
        {
            return Err(crate::HostError::Config(format!(
                "asset base URL must be http(s): {}",
                self.asset_base_url
            )));
        }
        if self.picker_command.split_whitespace().next().is_none() {
            return Err(crate::HostError::Config("picker command must not be empty".into()));
        }
        Ok(())
    }
}
