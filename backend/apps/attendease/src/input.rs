//! Interactive line commands for the issue and scan loops

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuerInput {
    Generate(String),
    /// Empty means the course currently shown
    Regenerate(String),
    Reveal,
    Help,
    Quit,
}

impl IssuerInput {
    pub const HELP: &'static str =
        "Commands: new <COURSE> | g [COURSE] (regenerate) | r (reveal 5s) | ? (help) | q (quit)";

    /// `None` for blank lines
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));

        match command.to_ascii_lowercase().as_str() {
            "" => None,
            "n" | "new" => Some(IssuerInput::Generate(rest.to_string())),
            "g" | "regenerate" => Some(IssuerInput::Regenerate(rest.to_string())),
            "r" | "reveal" => Some(IssuerInput::Reveal),
            "q" | "quit" | "exit" => Some(IssuerInput::Quit),
            _ => Some(IssuerInput::Help),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanInput {
    Verify,
    StartCapture,
    StopCapture,
    Reset,
    /// Simulated capture device failure
    DeviceError(String),
    /// Anything else is what the camera read
    Capture(String),
    Help,
    Quit,
}

impl ScanInput {
    pub const HELP: &'static str = "Commands: <Enter> (verify) | start | stop | back (reset) | \
         ? (help) | q (quit); any other line is treated as a scanned code";

    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "v" | "verify" => ScanInput::Verify,
            "start" => ScanInput::StartCapture,
            "stop" => ScanInput::StopCapture,
            "back" | "reset" | "again" => ScanInput::Reset,
            "?" | "help" => ScanInput::Help,
            "q" | "quit" | "exit" => ScanInput::Quit,
            _ => match trimmed.strip_prefix("!error") {
                Some(message) => ScanInput::DeviceError(message.trim().to_string()),
                None => ScanInput::Capture(trimmed.to_string()),
            },
        }
    }
}
