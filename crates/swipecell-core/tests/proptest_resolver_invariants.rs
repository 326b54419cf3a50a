//! Property-based invariant tests for state resolution and the session
//! controller.
//!
//! 1. State escalation is monotonic in |p| on each side
//! 2. Inactive slots are never selected
//! 3. Alpha stays in [0, 1] and reaches 1 at the first trigger
//! 4. Icon frames are integral and vertically centred
//! 5. Under arbitrary drags the offset never leaves the travel bounds
//! 6. Every released session settles exactly once

use proptest::prelude::*;
use swipecell_core::animation::{AnimationCurve, AnimationTiming};
use swipecell_core::geometry::{Point, Rect, Size};
use swipecell_core::host::{AnimationId, AnimationRequest, OverlayLayers};
use swipecell_core::resolver::{IconPlacement, StateResolver, can_travel};
use swipecell_core::session::SwipeSessionController;
use swipecell_core::{Color, PresentationHost, SwipeConfig, SwipeEvent, SwipeMode, SwipeSlots, SwipeState};

// ── Strategies ──────────────────────────────────────────────────────────

fn mode_strategy() -> impl Strategy<Value = SwipeMode> {
    prop_oneof![
        Just(SwipeMode::None),
        Just(SwipeMode::Exit),
        Just(SwipeMode::Switch),
    ]
}

fn slots_strategy() -> impl Strategy<Value = SwipeSlots<u8, ()>> {
    prop::array::uniform4(mode_strategy()).prop_map(|modes| {
        let mut slots = SwipeSlots::new();
        for (state, mode) in SwipeState::ALL.into_iter().zip(modes) {
            slots.set(state, state as u8, Color::rgb(1, 2, 3), mode, ());
        }
        slots
    })
}

fn config_strategy() -> impl Strategy<Value = SwipeConfig> {
    (0.01f64..0.5, 0.0f64..0.5, any::<bool>(), any::<bool>()).prop_map(
        |(first, gap, immediate, animate)| {
            SwipeConfig::default()
                .with_first_trigger(first)
                .with_second_trigger((first + gap).min(1.0))
                .with_start_immediately(immediate)
                .with_animate_icons(animate)
        },
    )
}

fn rank(state: SwipeState) -> u8 {
    match state {
        SwipeState::None => 0,
        SwipeState::State1 | SwipeState::State3 => 1,
        SwipeState::State2 | SwipeState::State4 => 2,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1–2. State resolution
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn state_escalates_with_distance(
        config in config_strategy(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
        sign in prop_oneof![Just(1.0f64), Just(-1.0f64)],
    ) {
        let mut slots = SwipeSlots::<u8, ()>::new();
        for state in SwipeState::ALL {
            slots.set(state, 0, Color::WHITE, SwipeMode::Switch, ());
        }
        let resolver = StateResolver::new(&config, &slots);
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let s_near = resolver.state(sign * near);
        let s_far = resolver.state(sign * far);
        prop_assert!(
            rank(s_near) <= rank(s_far),
            "{:?} at {} outranks {:?} at {}", s_near, sign * near, s_far, sign * far
        );
    }

    #[test]
    fn resolved_state_is_active(slots in slots_strategy(), config in config_strategy(), p in -1.0f64..=1.0) {
        let resolver = StateResolver::new(&config, &slots);
        let state = resolver.state(p);
        if state != SwipeState::None {
            prop_assert!(slots.is_active(state));
            prop_assert_eq!(state.direction(), resolver.direction(p));
        }
        let icon = resolver.icon_state(p);
        if icon != SwipeState::None {
            prop_assert!(slots.is_active(icon));
        }
    }

    #[test]
    fn blocked_side_rejects_travel(slots in slots_strategy(), p in -1.0f64..=1.0) {
        let open = slots.travel_directions();
        if can_travel(p, open) && p > 0.0 {
            prop_assert!(slots.is_active(SwipeState::State1) || slots.is_active(SwipeState::State2));
        }
        if can_travel(p, open) && p < 0.0 {
            prop_assert!(slots.is_active(SwipeState::State3) || slots.is_active(SwipeState::State4));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3–4. Alpha and icon frames
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn alpha_is_unit_and_saturates(config in config_strategy(), p in -1.0f64..=1.0) {
        let slots = SwipeSlots::<u8, ()>::new();
        let resolver = StateResolver::new(&config, &slots);
        let alpha = resolver.alpha(p);
        prop_assert!((0.0..=1.0).contains(&alpha));
        if p.abs() >= config.first_trigger {
            prop_assert_eq!(alpha, 1.0);
        }
    }

    #[test]
    fn icon_frames_are_integral(
        config in config_strategy(),
        p in -1.0f64..=1.0,
        width in 40.0f64..1200.0,
        height in 20.0f64..200.0,
        icon in 4.0f64..40.0,
    ) {
        let slots = SwipeSlots::<u8, ()>::new();
        let resolver = StateResolver::new(&config, &slots);
        let frame: Rect = resolver
            .icon_frame(p, Size::new(icon, icon), Size::new(width, height), IconPlacement::Dragging)
            .expect("dragging placement always yields a frame");
        prop_assert_eq!(frame.x, frame.x.floor());
        prop_assert_eq!(frame.y, frame.y.floor());
        prop_assert_eq!(frame.right(), frame.right().ceil());
        prop_assert!(frame.width >= icon && frame.height >= icon);
        prop_assert!((frame.center().y - height / 2.0).abs() <= 1.0);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5–6. Session controller under arbitrary input
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct NullHost {
    width: f64,
    offset: f64,
    requests: Vec<AnimationRequest>,
}

impl PresentationHost for NullHost {
    type View = u8;
    type Image = ();

    fn bounds(&self) -> Size {
        Size::new(self.width, 48.0)
    }
    fn view_size(&self, _view: &u8) -> Size {
        Size::new(12.0, 12.0)
    }
    fn capture_snapshot(&mut self) {}
    fn install_overlay(&mut self, _layers: OverlayLayers<()>) {}
    fn remove_overlay(&mut self) {}
    fn set_snapshot_offset(&mut self, offset: f64) {
        self.offset = offset;
    }
    fn set_indicator_color(&mut self, _color: Color) {}
    fn set_icon(&mut self, _view: &u8) {}
    fn set_icon_alpha(&mut self, _alpha: f64) {}
    fn set_icon_frame(&mut self, _frame: Rect) {}
    fn animate(&mut self, request: AnimationRequest) {
        self.requests.push(request);
    }
    fn request_row_removal(&mut self) {}
}

#[derive(Debug, Clone)]
enum Op {
    Drag(f64),
    Release(f64),
    Finish,
    Stale(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (-400.0f64..400.0).prop_map(Op::Drag),
        1 => (-2000.0f64..2000.0).prop_map(Op::Release),
        1 => Just(Op::Finish),
        1 => (1000u64..2000).prop_map(Op::Stale),
    ]
}

proptest! {
    #[test]
    fn offset_stays_within_travel_bounds(
        slots in slots_strategy(),
        config in config_strategy(),
        width in 80.0f64..800.0,
        ops in prop::collection::vec(op_strategy(), 0..120),
    ) {
        let mut host = NullHost { width, ..NullHost::default() };
        let mut controller = SwipeSessionController::<u8>::new();
        let (min, max) = StateResolver::new(&config, &slots).travel_bounds(width);
        let mut settled = 0usize;

        for op in ops {
            let event = match op {
                Op::Drag(dx) => SwipeEvent::Changed {
                    translation: Point::new(dx, 0.0),
                    velocity: Point::new(dx, 0.0),
                },
                Op::Release(vx) => SwipeEvent::Ended { velocity: Point::new(vx, 0.0) },
                Op::Finish => match host.requests.last() {
                    Some(request) => SwipeEvent::AnimationFinished(request.id),
                    None => continue,
                },
                Op::Stale(id) => SwipeEvent::AnimationFinished(AnimationId(id)),
            };
            if controller.handle(event, &mut host, &config, &slots).is_some() {
                settled += 1;
            }
            let offset = controller.offset();
            prop_assert!(
                offset >= min && offset <= max,
                "offset {} outside [{}, {}]", offset, min, max
            );
            prop_assert!(can_travel(offset / width, slots.travel_directions()));
        }

        prop_assert!(settled <= host.requests.len(), "{} settles for {} animations", settled, host.requests.len());
    }

    #[test]
    fn every_request_settles_once(
        slots in slots_strategy(),
        drags in prop::collection::vec(-300.0f64..300.0, 1..20),
        vx in -1000.0f64..1000.0,
    ) {
        let config = SwipeConfig::default();
        let mut host = NullHost { width: 320.0, ..NullHost::default() };
        let mut controller = SwipeSessionController::<u8>::new();
        for dx in drags {
            controller.handle(
                SwipeEvent::Changed { translation: Point::new(dx, 0.0), velocity: Point::ZERO },
                &mut host,
                &config,
                &slots,
            );
        }
        controller.handle(SwipeEvent::Cancelled { velocity: Point::new(vx, 0.0) }, &mut host, &config, &slots);
        prop_assert_eq!(host.requests.len(), 1);

        let request = host.requests[0];
        if request.timing.curve == AnimationCurve::EaseOut {
            prop_assert!(controller.is_exited());
        } else {
            prop_assert_eq!(
                request.timing,
                AnimationTiming::spring(config.animation_duration, config.damping, config.velocity)
            );
        }

        let first = controller.handle(SwipeEvent::AnimationFinished(request.id), &mut host, &config, &slots);
        let second = controller.handle(SwipeEvent::AnimationFinished(request.id), &mut host, &config, &slots);
        prop_assert!(first.is_some());
        prop_assert!(second.is_none());
    }
}
