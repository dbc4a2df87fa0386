// tests/signals.rs
#![cfg(unix)]

// Kept in its own test binary: the signals raised here go to the whole
// process.

use renderq::shutdown::install_signal_handlers;
use renderq_test_utils::{init_tracing, with_timeout};

fn raise(signal: libc::c_int) {
    let rc = unsafe { libc::raise(signal) };
    assert_eq!(rc, 0, "raise({signal}) failed");
}

#[tokio::test]
async fn sigterm_and_sigint_request_shutdown() {
    init_tracing();

    let mut on_term = install_signal_handlers().unwrap();
    assert!(!on_term.is_requested());

    raise(libc::SIGTERM);
    with_timeout(on_term.requested()).await;
    assert!(on_term.is_requested());

    let mut on_int = install_signal_handlers().unwrap();
    assert!(!on_int.is_requested());

    raise(libc::SIGINT);
    with_timeout(on_int.requested()).await;
    assert!(on_int.is_requested());
}
