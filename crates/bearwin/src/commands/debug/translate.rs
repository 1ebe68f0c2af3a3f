use bearwin_core::event::{self, Handle, RawMessage};

#[derive(clap::Args)]
pub struct TranslateArgs {
    /// Message id, e.g. 0x0005 for WM_SIZE
    pub kind: String,
    /// First message parameter (hex with 0x prefix, or decimal)
    pub wparam: String,
    /// Second message parameter (hex with 0x prefix, or decimal; may be negative)
    #[arg(allow_hyphen_values = true)]
    pub lparam: String,
    /// Print the event as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs a raw message through the translator and prints the result.
pub fn execute(args: &TranslateArgs) {
    match describe(args) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn describe(args: &TranslateArgs) -> Result<String, String> {
    let kind = parse_word(&args.kind)
        .and_then(|k| u32::try_from(k).ok())
        .ok_or_else(|| format!("invalid message id: {:?}", args.kind))?;
    let wparam = parse_word(&args.wparam)
        .ok_or_else(|| format!("invalid wparam: {:?}", args.wparam))?;
    let lparam = parse_signed(&args.lparam)
        .ok_or_else(|| format!("invalid lparam: {:?}", args.lparam))?;

    let raw = RawMessage::new(Handle::NULL, kind, wparam, lparam);
    let Some(event) = event::translate(&raw) else {
        return Ok("no domain event".into());
    };

    if args.json {
        return serde_json::to_string(&event).map_err(|e| e.to_string());
    }
    Ok(event.to_string())
}

/// Parses `0x`-prefixed hex or plain decimal.
fn parse_word(s: &str) -> Option<usize> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Like [`parse_word`], but also accepts negative decimals. Hex keeps its
/// bit pattern.
fn parse_signed(s: &str) -> Option<isize> {
    let s = s.trim();
    if s.starts_with('-') {
        return s.parse().ok();
    }
    parse_word(s).map(|w| w as isize)
}
