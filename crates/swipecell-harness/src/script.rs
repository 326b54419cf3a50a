#![forbid(unsafe_code)]

//! Scripted pan gestures.
//!
//! A [`GestureScript`] is a list of [`SwipeEvent`]s built from pixel
//! distances, so tests read as "drag 60px right in 4 steps, lift".

use swipecell_core::geometry::Point;
use swipecell_core::{PresentationHost, SwipeCell, SwipeEvent};

/// Sample rate assumed when deriving velocities from step sizes.
pub const SAMPLE_HZ: f64 = 60.0;

/// Builder for one pan gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureScript {
    events: Vec<SwipeEvent>,
}

impl GestureScript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A full swipe: `dx` pixels split into `steps` samples, then a lift
    /// with horizontal velocity `vx`.
    #[must_use]
    pub fn swipe(dx: f64, steps: usize, vx: f64) -> Self {
        Self::new().drag(dx, steps).end(vx)
    }

    /// Append `dx` pixels of horizontal movement as `steps` samples.
    ///
    /// The first sample of an empty script is a `Began`.
    #[must_use]
    pub fn drag(mut self, dx: f64, steps: usize) -> Self {
        let steps = steps.max(1);
        let step = dx / steps as f64;
        for _ in 0..steps {
            let event = self.movement(Point::new(step, 0.0));
            self.events.push(event);
        }
        self
    }

    /// Append one movement sample with an explicit vertical component.
    #[must_use]
    pub fn sample(mut self, dx: f64, dy: f64) -> Self {
        let event = self.movement(Point::new(dx, dy));
        self.events.push(event);
        self
    }

    #[must_use]
    pub fn end(mut self, vx: f64) -> Self {
        self.events.push(SwipeEvent::Ended {
            velocity: Point::new(vx, 0.0),
        });
        self
    }

    #[must_use]
    pub fn cancel(mut self, vx: f64) -> Self {
        self.events.push(SwipeEvent::Cancelled {
            velocity: Point::new(vx, 0.0),
        });
        self
    }

    fn movement(&self, translation: Point) -> SwipeEvent {
        let velocity = Point::new(translation.x * SAMPLE_HZ, translation.y * SAMPLE_HZ);
        if self.events.is_empty() {
            SwipeEvent::Began {
                translation,
                velocity,
            }
        } else {
            SwipeEvent::Changed {
                translation,
                velocity,
            }
        }
    }

    pub fn events(&self) -> &[SwipeEvent] {
        &self.events
    }

    /// Velocity of the first sample, used to ask the cell whether to begin.
    pub fn initial_velocity(&self) -> Point {
        match self.events.first() {
            Some(SwipeEvent::Began { velocity, .. }) => *velocity,
            _ => Point::ZERO,
        }
    }

    /// Deliver the script to `cell` if the cell agrees to begin.
    ///
    /// Returns whether the gesture was recognized.
    pub fn play<H: PresentationHost>(&self, cell: &mut SwipeCell<H>) -> bool {
        if !cell.should_begin(self.initial_velocity()) {
            return false;
        }
        for event in &self.events {
            cell.handle_event(*event);
        }
        true
    }

    /// Deliver every event, skipping the recognizer check.
    pub fn force<H: PresentationHost>(&self, cell: &mut SwipeCell<H>) {
        for event in &self.events {
            cell.handle_event(*event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_splits_distance_and_starts_with_began() {
        let script = GestureScript::swipe(60.0, 3, 120.0);
        let events = script.events();
        assert_eq!(events.len(), 4);
        assert!(matches!(
            events[0],
            SwipeEvent::Began { translation, .. } if translation == Point::new(20.0, 0.0)
        ));
        assert!(matches!(events[1], SwipeEvent::Changed { .. }));
        assert!(matches!(
            events[3],
            SwipeEvent::Ended { velocity } if velocity.x == 120.0
        ));
        assert_eq!(script.initial_velocity(), Point::new(1200.0, 0.0));
    }

    #[test]
    fn zero_steps_still_moves_once() {
        let script = GestureScript::new().drag(-30.0, 0);
        assert_eq!(script.events().len(), 1);
    }

    #[test]
    fn vertical_sample_has_vertical_velocity() {
        let script = GestureScript::new().sample(1.0, 10.0);
        assert!(!script.initial_velocity().is_horizontal());
    }
}
