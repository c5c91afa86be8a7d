use loan_calc_core::LoanParameters;
use std::io::{self, Read};

/// Read loan parameters piped on stdin as JSON.
///
/// An interactive terminal or an empty pipe is an error, since `--input -`
/// was asked for explicitly.
pub fn read_parameters() -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Err("--input - expects loan parameters piped on stdin, not a terminal".into());
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_parameters(&buffer)
}

/// Parse a JSON loan parameter document.
pub fn parse_parameters(text: &str) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("--input - expects loan parameters piped on stdin, got nothing".into());
    }

    let params: LoanParameters = serde_json::from_str(trimmed)
        .map_err(|e| format!("invalid loan parameters on stdin: {}", e))?;
    log::debug!("read loan parameters from stdin");
    Ok(params)
}
