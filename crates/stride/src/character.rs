use glam::{Quat, Vec3};

use crate::config::LocomotionConfig;
use crate::crouch::CrouchController;
use crate::event::{CrouchEvents, CrouchSignal};
use crate::geometry::{CapsuleCollider, HeadOffset};
use crate::input::{InputBinding, InputSource, InputState};
use crate::motion::{CameraLook, CharacterBody, LocomotionBody};
use crate::speed::SpeedOverrideStack;

/// What one tick did, for callers that want to log or assert on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub displacement: Vec3,
    pub speed: f32,
    pub grounded: bool,
    pub crouch_signal: Option<CrouchSignal>,
}

/// A single playable character: input, movement, look and crouch driven by one `tick(dt)`.
pub struct Character<B: CharacterBody> {
    config: LocomotionConfig,
    body: B,
    facing: Quat,
    camera_rotation: Quat,
    head: Option<HeadOffset>,
    collider: Option<CapsuleCollider>,
    overrides: SpeedOverrideStack,
    events: CrouchEvents,
    input: InputBinding,
    locomotion: LocomotionBody,
    look: CameraLook,
    crouch: CrouchController,
}

impl<B: CharacterBody> Character<B> {
    pub fn new(config: LocomotionConfig, body: B) -> Self {
        Self {
            locomotion: LocomotionBody::new(&config),
            look: CameraLook::new(&config),
            crouch: CrouchController::new(&config),
            config,
            body,
            facing: Quat::IDENTITY,
            camera_rotation: Quat::IDENTITY,
            head: None,
            collider: None,
            overrides: SpeedOverrideStack::new(),
            events: CrouchEvents::new(),
            input: InputBinding::new(),
        }
    }

    pub fn with_head(mut self, head: HeadOffset) -> Self {
        self.attach_head(head);
        self
    }

    pub fn with_collider(mut self, collider: CapsuleCollider) -> Self {
        self.attach_collider(collider);
        self
    }

    pub fn attach_head(&mut self, head: HeadOffset) {
        self.crouch.capture_defaults(Some(&head), None);
        self.head = Some(head);
    }

    pub fn attach_collider(&mut self, collider: CapsuleCollider) {
        self.crouch.capture_defaults(None, Some(&collider));
        self.collider = Some(collider);
    }

    pub fn detach_head(&mut self) -> Option<HeadOffset> {
        self.head.take()
    }

    pub fn detach_collider(&mut self) -> Option<CapsuleCollider> {
        self.collider.take()
    }

    /// Binds the external input layer. Ticks read all-zero input while unbound.
    pub fn bind_input(&mut self, source: impl InputSource + 'static) {
        self.input.bind(source);
    }

    pub fn unbind_input(&mut self) -> bool {
        self.input.unbind()
    }

    pub fn input_mut(&mut self) -> &mut InputBinding {
        &mut self.input
    }

    pub fn tick(&mut self, dt: f32) -> TickReport {
        let input = self.input.sample();
        self.tick_with(dt, &input)
    }

    /// Movement, then look, then crouch; the crouch decision precedes its smoothing.
    pub fn tick_with(&mut self, dt: f32, input: &InputState) -> TickReport {
        let speed = self.resolved_speed();
        let displacement =
            self.locomotion
                .tick(&mut self.body, self.facing, dt, input.move_vector, speed);

        self.camera_rotation = self.look.tick(
            dt,
            input.look_delta,
            self.config.sensitivity,
            &mut self.facing,
        );

        let crouch_signal = self.crouch.tick(
            dt,
            input.crouch_held(),
            self.head.as_mut(),
            self.collider.as_mut(),
            &mut self.overrides,
            &mut self.events,
        );

        if let Some(collider) = &self.collider {
            self.body.resize(collider);
        }

        TickReport {
            displacement,
            speed,
            grounded: self.locomotion.is_grounded(),
            crouch_signal,
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Swaps tunables without resetting motion, look or crouch state.
    pub fn set_config(&mut self, config: LocomotionConfig) {
        self.locomotion.apply_config(&config);
        self.look.set_pitch_limit(config.pitch_clamp_degrees);
        self.crouch.apply_config(&config);
        self.config = config;
    }

    pub fn resolved_speed(&self) -> f32 {
        self.overrides.resolve(self.config.walk_speed)
    }

    pub fn speed_overrides(&self) -> &SpeedOverrideStack {
        &self.overrides
    }

    pub fn speed_overrides_mut(&mut self) -> &mut SpeedOverrideStack {
        &mut self.overrides
    }

    pub fn events_mut(&mut self) -> &mut CrouchEvents {
        &mut self.events
    }

    pub fn facing(&self) -> Quat {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Quat) {
        self.facing = facing.normalize();
    }

    pub fn camera_rotation(&self) -> Quat {
        self.camera_rotation
    }

    pub fn pitch(&self) -> f32 {
        self.look.pitch()
    }

    pub fn is_crouched(&self) -> bool {
        self.crouch.is_crouched()
    }

    pub fn crouch(&self) -> &CrouchController {
        &self.crouch
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.locomotion.vertical_velocity()
    }

    pub fn is_grounded(&self) -> bool {
        self.locomotion.is_grounded()
    }

    pub fn head(&self) -> Option<&HeadOffset> {
        self.head.as_ref()
    }

    pub fn collider(&self) -> Option<&CapsuleCollider> {
        self.collider.as_ref()
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;

    #[derive(Default)]
    struct Floor {
        moved: Vec3,
        resized: Option<f32>,
    }

    impl CharacterBody for Floor {
        fn is_grounded(&self) -> bool {
            true
        }

        fn move_with_collision(&mut self, displacement: Vec3) -> bool {
            self.moved += displacement;
            true
        }

        fn resize(&mut self, capsule: &CapsuleCollider) {
            self.resized = Some(capsule.height);
        }
    }

    fn character() -> Character<Floor> {
        Character::new(LocomotionConfig::default(), Floor::default())
            .with_head(HeadOffset::new(Vec3::new(0.0, 1.6, 0.0)))
            .with_collider(CapsuleCollider::new(2.0, 0.4))
    }

    #[test]
    fn unbound_input_leaves_character_still() {
        let mut character = character();

        for _ in 0..30 {
            character.tick(1.0 / 60.0);
        }

        let moved = character.body().moved;
        assert_eq!(Vec2::new(moved.x, moved.z), Vec2::ZERO);
        assert_eq!(character.facing(), Quat::IDENTITY);
        assert_eq!(character.pitch(), 0.0);
        assert!(!character.is_crouched());
    }

    #[test]
    fn crouching_slows_movement() {
        let mut character = character();
        let walking = character.tick_with(0.1, &InputState::new(Vec2::Y, Vec2::ZERO, false));
        let crouch_start = character.tick_with(0.1, &InputState::new(Vec2::Y, Vec2::ZERO, true));
        let crouched = character.tick_with(0.1, &InputState::new(Vec2::Y, Vec2::ZERO, true));

        assert_eq!(walking.speed, 5.0);
        // Speed is resolved before the crouch decision of the same tick.
        assert_eq!(crouch_start.speed, 5.0);
        assert_eq!(crouch_start.crouch_signal, Some(CrouchSignal::Start));
        assert_eq!(crouched.speed, 2.0);
        assert!((crouched.displacement.z - 0.2).abs() < 1e-5);
    }

    #[test]
    fn collider_changes_reach_the_body() {
        let mut character = character();
        character.tick_with(1.0 / 60.0, &InputState::new(Vec2::ZERO, Vec2::ZERO, true));

        let height = character.collider().unwrap().height;
        assert!(height < 2.0);
        assert_eq!(character.body().resized, Some(height));
    }

    #[test]
    fn bound_input_drives_look() {
        let mut character = character();
        let shared = Rc::new(Cell::new(InputState::new(Vec2::ZERO, Vec2::new(0.0, 30.0), false)));
        let source = Rc::clone(&shared);
        character.bind_input(move || source.get());

        character.tick(0.1);
        assert!((character.pitch() + 6.0).abs() < 1e-4);

        shared.set(InputState::default());
        character.tick(0.1);
        assert!((character.pitch() + 6.0).abs() < 1e-4);

        assert!(character.unbind_input());
    }

    #[test]
    fn set_config_updates_walk_speed() {
        let mut character = character();
        character.set_config(LocomotionConfig {
            walk_speed: 8.0,
            pitch_clamp_degrees: 30.0,
            ..Default::default()
        });

        assert_eq!(character.resolved_speed(), 8.0);
        character.tick_with(1.0, &InputState::new(Vec2::ZERO, Vec2::new(0.0, -100.0), false));
        assert_eq!(character.pitch(), 30.0);
    }

    #[test]
    fn set_config_reaches_active_crouch_override() {
        let mut character = character();
        character.tick_with(1.0 / 60.0, &InputState::new(Vec2::ZERO, Vec2::ZERO, true));

        character.set_config(LocomotionConfig {
            crouch_speed: 1.5,
            ..Default::default()
        });

        assert!(character.is_crouched());
        assert_eq!(character.resolved_speed(), 1.5);
    }
}
