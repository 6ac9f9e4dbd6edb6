use weekly_poll::setup_logging;

#[test]
fn test_logging_setup() {
    let result = std::panic::catch_unwind(|| {
        setup_logging();
        // A second call must not panic either
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging function should not panic");
}
