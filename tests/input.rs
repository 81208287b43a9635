use tankppu::input::{ButtonKind, Buttons, KeyBindings, KeyCode};

#[test]
fn test_default_bindings_cover_arrows_wasd_and_space() {
    let keys = KeyBindings::default();
    assert_eq!(keys.lookup(KeyCode::ArrowUp), Some(ButtonKind::Up));
    assert_eq!(keys.lookup(KeyCode::KeyW), Some(ButtonKind::Up));
    assert_eq!(keys.lookup(KeyCode::KeyA), Some(ButtonKind::Left));
    assert_eq!(keys.lookup(KeyCode::ArrowRight), Some(ButtonKind::Right));
    assert_eq!(keys.lookup(KeyCode::Space), Some(ButtonKind::Fire));
    assert_eq!(keys.lookup(KeyCode::Escape), None);
}

#[test]
fn test_unbound_keys_are_not_consumed() {
    let keys = KeyBindings::default();
    let mut buttons = Buttons::new();
    assert!(!keys.handle_key(KeyCode::KeyQ, true, &mut buttons));
    assert_eq!(buttons, Buttons::new());
}

#[test]
fn test_repeats_count_once_until_released() {
    let keys = KeyBindings::default();
    let mut buttons = Buttons::new();
    for _ in 0..3 {
        assert!(keys.handle_key(KeyCode::Space, true, &mut buttons));
    }
    assert_eq!(buttons.fire.downs, 1);
    assert!(buttons.fire.pressed);

    keys.handle_key(KeyCode::Space, false, &mut buttons);
    keys.handle_key(KeyCode::Space, true, &mut buttons);
    assert_eq!(buttons.fire.downs, 2);
}

#[test]
fn test_end_frame_clears_counts_but_not_held_state() {
    let mut buttons = Buttons::new();
    buttons.set(ButtonKind::Left, true);
    buttons.set(ButtonKind::Fire, true);
    buttons.end_frame();
    assert_eq!(buttons.get(ButtonKind::Left).downs, 0);
    assert!(buttons.get(ButtonKind::Left).pressed);
    assert!(buttons.fire.pressed);
}

#[test]
fn test_custom_binding_replaces_a_key() {
    let mut keys = KeyBindings::empty();
    keys.bind(KeyCode::KeyJ, ButtonKind::Fire);
    keys.bind(KeyCode::KeyJ, ButtonKind::Down);
    let mut buttons = Buttons::new();
    keys.handle_key(KeyCode::KeyJ, true, &mut buttons);
    assert!(buttons.down.pressed);
    assert!(!buttons.fire.pressed);
}
