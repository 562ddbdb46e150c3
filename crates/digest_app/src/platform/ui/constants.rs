pub const PROMPT: &str = "url> ";
pub const SUMMARY_TITLE: &str = "Article Summary";
pub const HISTORY_TITLE: &str = "History";
pub const EMPTY_HISTORY: &str = "(no articles yet)";
pub const COPIED_MARKER: &str = "[copied]";
pub const COPY_MARKER: &str = "[copy]";
pub const BUSY_NOTICE: &str = "A summary is already being fetched; wait for it to finish.";
pub const HELP_TEXT: &str = "\
Commands:
  <url>            summarize an article (same as `submit <url>`)
  open <n>         show the stored summary of history entry n
  copy <n>         copy the URL of history entry n to the clipboard
  show             redraw the screen
  help             show this help
  quit             exit";
