//! Per-element pan/zoom state machine

use labelhost_core::{
    messages::{Point, PointerEvent, ZoomUpdate},
    Cursor,
};

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 3.0;
pub const WHEEL_STEP: f32 = 0.05;

/// Clamps to [`MIN_ZOOM`, `MAX_ZOOM`]; NaN becomes 1.0
pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() {
        1.0
    } else {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

/// CSS transform for the zoom target
pub fn transform_css(zoom: f32, pan_x: f32, pan_y: f32) -> String {
    format!("scale({}) translate({}px, {}px)", zoom, pan_x, pan_y)
}

/// What one pointer event changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureOutcome {
    /// New transform for the zoom target
    pub transform: Option<String>,
    /// New cursor for the element
    pub cursor: Option<Cursor>,
    /// Set when the event ends a gesture
    pub update: Option<ZoomUpdate>,
}

impl GestureOutcome {
    pub fn is_empty(&self) -> bool {
        self.transform.is_none() && self.cursor.is_none() && self.update.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    start_distance: f32,
    start_zoom: f32,
}

/// Pan/zoom state of one zoomable element
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTracker {
    element_id: String,
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
    dragging: bool,
    last: Point,
    pinch: Pinch,
}

impl GestureTracker {
    pub fn new(element_id: impl Into<String>, initial_zoom: f32) -> Self {
        Self {
            element_id: element_id.into(),
            zoom: clamp_zoom(initial_zoom),
            pan_x: 0.0,
            pan_y: 0.0,
            dragging: false,
            last: Point::default(),
            pinch: Pinch {
                start_distance: 0.0,
                start_zoom: 1.0,
            },
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn transform(&self) -> String {
        transform_css(self.zoom, self.pan_x, self.pan_y)
    }

    pub fn snapshot(&self) -> ZoomUpdate {
        ZoomUpdate {
            element_id: self.element_id.clone(),
            zoom: self.zoom,
            pan_x: self.pan_x,
            pan_y: self.pan_y,
        }
    }

    /// Overwrites zoom and pan, returning the transform to apply
    pub fn set(&mut self, zoom: f32, pan_x: f32, pan_y: f32) -> String {
        self.zoom = clamp_zoom(zoom);
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        self.transform()
    }

    fn pan_to(&mut self, to: Point) {
        self.pan_x += (to.x - self.last.x) / self.zoom;
        self.pan_y += (to.y - self.last.y) / self.zoom;
        self.last = to;
    }

    fn moved(&self) -> GestureOutcome {
        GestureOutcome {
            transform: Some(self.transform()),
            ..GestureOutcome::default()
        }
    }

    /// Feeds one pointer event through the state machine
    pub fn handle(&mut self, event: &PointerEvent) -> GestureOutcome {
        match event {
            PointerEvent::Wheel { delta_y } => {
                let step = if *delta_y > 0.0 { -WHEEL_STEP } else { WHEEL_STEP };
                self.zoom = clamp_zoom(self.zoom + step);
                GestureOutcome {
                    transform: Some(self.transform()),
                    cursor: None,
                    update: Some(self.snapshot()),
                }
            },
            PointerEvent::MouseDown { button, x, y } => {
                if *button != 0 {
                    return GestureOutcome::default();
                }
                self.dragging = true;
                self.last = Point::new(*x, *y);
                GestureOutcome {
                    cursor: Some(Cursor::Grabbing),
                    ..GestureOutcome::default()
                }
            },
            PointerEvent::MouseMove { x, y } => {
                if !self.dragging {
                    return GestureOutcome::default();
                }
                self.pan_to(Point::new(*x, *y));
                self.moved()
            },
            PointerEvent::MouseUp => {
                if !self.dragging {
                    return GestureOutcome::default();
                }
                self.dragging = false;
                GestureOutcome {
                    transform: None,
                    cursor: Some(Cursor::Grab),
                    update: Some(self.snapshot()),
                }
            },
            PointerEvent::TouchStart { touches } => {
                match touches.as_slice() {
                    [a, b] => {
                        self.pinch = Pinch {
                            start_distance: a.distance(*b),
                            start_zoom: self.zoom,
                        };
                    },
                    [t] => {
                        self.dragging = true;
                        self.last = *t;
                    },
                    _ => {},
                }
                GestureOutcome::default()
            },
            PointerEvent::TouchMove { touches } => match touches.as_slice() {
                [a, b] => {
                    if self.pinch.start_distance <= 0.0 {
                        return GestureOutcome::default();
                    }
                    let scale = a.distance(*b) / self.pinch.start_distance;
                    self.zoom = clamp_zoom(self.pinch.start_zoom * scale);
                    self.moved()
                },
                [t] if self.dragging => {
                    self.pan_to(*t);
                    self.moved()
                },
                _ => GestureOutcome::default(),
            },
            PointerEvent::TouchEnd => {
                self.dragging = false;
                GestureOutcome {
                    update: Some(self.snapshot()),
                    ..GestureOutcome::default()
                }
            },
        }
    }
}
