/// Leading marker that distinguishes a claimed alias from a raw author id
pub const HANDLE_SIGIL: char = '@';

/// Prompt drawn in front of the input box
pub const INPUT_PROMPT: &str = "> ";

/// Gap between the display timestamp and the message text on a rendered line
pub const TIME_SEPARATOR: &str = "  ";

/// Rows of fixed chrome (header, borders, status line) around the message list
pub const DEFAULT_CHROME_ROWS: u16 = 6;

/// How long messages are kept around, and therefore how long a read marker
/// needs to live (7 days)
pub const RETENTION_WINDOW_HOURS: i64 = 7 * 24;

/// Label separators recognised during alias transliteration
pub const LABEL_SEPARATORS: [char; 4] = ['.', '\u{3002}', '\u{FF0E}', '\u{FF61}'];

/// Prefix of a punycode-encoded label
pub const ACE_PREFIX: &str = "xn--";
