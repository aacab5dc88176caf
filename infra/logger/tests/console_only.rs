use brk_domain::config::LoggingConfig;
use brk_logger::Logger;

#[test]
fn default_logging_section_logs_to_console_only() {
    let logger = Logger::builder()
        .config(&LoggingConfig::default())
        .name("brk-console")
        .init()
        .expect("logger should initialize");

    assert!(logger.guard().is_none(), "no file guard without a log path");
}
