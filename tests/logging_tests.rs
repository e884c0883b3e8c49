use vertovoice::setup_logging;

#[test]
fn test_logging_setup() {
    let result = std::panic::catch_unwind(|| {
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging function should not panic");
}

#[test]
fn test_logging_setup_twice() {
    // Tests in one binary share a process, so a second init must be tolerated.
    let result = std::panic::catch_unwind(|| {
        setup_logging();
        setup_logging();
    });

    assert!(result.is_ok(), "repeated setup_logging should not panic");
}
