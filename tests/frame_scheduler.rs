mod common;

mod tests {
    use keyglow::frame_scheduler::{DEFAULT_FRAME_DURATION, HOTKEY_PAUSE};
    use keyglow::{
        Action, ActionQueue, Duration, EffectId, FrameScheduler, HotkeyMap, Instant, Renderer, Rgb,
    };

    use super::common::{MockPin, MockStrip, controller_2x3};

    type TestScheduler<'a> = FrameScheduler<'a, MockStrip, MockPin, 2, 3, 6, 6>;

    fn at(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    fn scheduler<'a>() -> TestScheduler<'a> {
        let hotkeys = HotkeyMap::from_bindings(&[
            (0, Action::NextEffect),
            (2, Action::TogglePower),
        ])
        .unwrap();
        let mut scheduler = FrameScheduler::new(Renderer::new(controller_2x3()), hotkeys);
        scheduler.start(at(0)).unwrap();
        scheduler
    }

    fn frames(scheduler: &TestScheduler<'_>) -> usize {
        scheduler.renderer().controller().driver().frames.len()
    }

    #[test]
    fn test_start_shows_blank_frame() {
        let scheduler = scheduler();
        assert_eq!(frames(&scheduler), 1);
        assert_eq!(scheduler.renderer().effect_id(), EffectId::Solid);
    }

    #[test]
    fn test_tick_renders_and_paces() {
        let mut scheduler = scheduler();
        let result = scheduler.tick(at(0), []).unwrap();

        assert_eq!(result.actions, 0);
        assert_eq!(result.sleep_duration, DEFAULT_FRAME_DURATION);
        assert_eq!(frames(&scheduler), 2);

        let frame = scheduler.renderer().controller().driver().last_frame();
        assert_eq!(frame, [Rgb { r: 255, g: 0, b: 0 }; 6]);
    }

    #[test]
    fn test_hotkey_switches_effect_and_pauses() {
        let mut scheduler = scheduler();
        let result = scheduler.tick(at(11), [0]).unwrap();

        assert_eq!(result.actions, 1);
        assert_eq!(scheduler.renderer().effect_id(), EffectId::Breathing);
        assert_eq!(result.next_deadline, at(11) + HOTKEY_PAUSE);
        assert_eq!(result.sleep_duration, HOTKEY_PAUSE);

        // Held hotkeys fire again on the next scan
        scheduler.tick(result.next_deadline, [0]).unwrap();
        assert_eq!(scheduler.renderer().effect_id(), EffectId::Reactive);

        let result = scheduler.tick(at(300), [1]).unwrap();
        assert_eq!(result.actions, 0);
        assert_eq!(scheduler.renderer().effect_id(), EffectId::Reactive);
        assert!(scheduler.keyboard().is_pressed(1));
    }

    #[test]
    fn test_early_tick_skips_held_hotkey() {
        let mut scheduler = scheduler();
        scheduler.tick(at(11), [0]).unwrap();
        assert_eq!(scheduler.renderer().effect_id(), EffectId::Breathing);

        // Ticking before the deadline still renders but does not repeat
        let result = scheduler.tick(at(20), [0]).unwrap();
        assert_eq!(result.actions, 0);
        assert_eq!(scheduler.renderer().effect_id(), EffectId::Breathing);
        assert_eq!(frames(&scheduler), 3);

        let result = scheduler.tick(at(110), [0]).unwrap();
        assert_eq!(result.actions, 0);

        let result = scheduler.tick(at(11) + HOTKEY_PAUSE, [0]).unwrap();
        assert_eq!(result.actions, 1);
        assert_eq!(scheduler.renderer().effect_id(), EffectId::Reactive);
    }

    #[test]
    fn test_queued_action_bypasses_hotkey_pause() {
        let queue = ActionQueue::new();
        let mut scheduler = scheduler().with_actions(queue.receiver());
        scheduler.tick(at(11), [0]).unwrap();

        queue.sender().try_send(Action::CycleHue).unwrap();
        let result = scheduler.tick(at(20), [0]).unwrap();
        assert_eq!(result.actions, 1);
        assert_eq!(scheduler.renderer().effect_id(), EffectId::Breathing);
        assert_eq!(scheduler.renderer().controller().settings().hue, 8);
    }

    #[test]
    fn test_power_hotkey_blanks_strip() {
        let mut scheduler = scheduler();
        scheduler.tick(at(0), [2]).unwrap();

        let controller = scheduler.renderer().controller();
        assert!(!controller.settings().is_on);
        assert_eq!(controller.power_pin().is_high(), Some(false));
        assert_eq!(controller.driver().last_frame(), [Rgb::default(); 6]);
    }

    #[test]
    fn test_skips_backlog_after_stall() {
        let mut scheduler = scheduler();
        scheduler.tick(at(0), []).unwrap();

        let result = scheduler.tick(at(1000), []).unwrap();
        assert_eq!(result.next_deadline, at(1000) + DEFAULT_FRAME_DURATION);
        assert_eq!(result.sleep_duration, DEFAULT_FRAME_DURATION);
    }

    #[test]
    fn test_behind_schedule_does_not_sleep() {
        let mut scheduler = scheduler();
        scheduler.tick(at(0), []).unwrap();

        let late = at(0) + DEFAULT_FRAME_DURATION + Duration::from_millis(15);
        let result = scheduler.tick(late, []).unwrap();
        assert_eq!(result.sleep_duration, Duration::from_millis(0));
    }

    #[test]
    fn test_queued_actions() {
        let queue = ActionQueue::new();
        let mut scheduler = scheduler().with_actions(queue.receiver());
        queue.sender().try_send(Action::LowerBrightness).unwrap();
        queue.sender().try_send(Action::NextEffect).unwrap();

        let result = scheduler.tick(at(0), []).unwrap();
        assert_eq!(result.actions, 2);
        assert!(queue.is_empty());

        let renderer = scheduler.renderer();
        assert_eq!(renderer.effect_id(), EffectId::Breathing);
        assert_eq!(renderer.controller().settings().brightness, 239);
    }
}
