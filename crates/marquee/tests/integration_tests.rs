use marquee::*;

#[test]
fn test_basic_logging_functions() {
  // Calling every level must not panic
  verbose("Test verbose message");
  debug("Test debug message");
  info("Test info message");
  success("Test success message");
  warn("Test warning message");
  error("Test error message");
  announce("Test announcement");
}

#[test]
fn test_multiline_messages() {
  let multiline_msg = "First line\nSecond line\nThird line";
  info(multiline_msg);
  warn(multiline_msg);
  error(multiline_msg);
}

#[test]
fn test_macros_accept_format_arguments() {
  let records = 3;
  marquee::info!("loaded {records} records");
  marquee::warn!("{} of {} vectors skipped", 1, records);
  marquee::success!("done");
}

#[test]
fn test_threshold_controls_enabled_levels() {
  let original = level();

  set_level(Level::Warn);
  assert!(!enabled(Level::Info));
  assert!(enabled(Level::Warn));
  assert!(enabled(Level::Error));

  set_level(Level::Verbose);
  assert!(enabled(Level::Debug));

  set_level(original);
}
