use screen_mirror_core::SurfaceSize;

/// A line typed at the demo prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Press the start/stop button.
    Toggle,
    /// Allow capture in the consent dialog.
    Approve,
    /// Deny capture in the consent dialog.
    Deny,
    /// Dismiss the consent dialog without choosing.
    Cancel,
    /// Re-layout the output view.
    Resize(SurfaceSize),
    /// Print the controller snapshot as JSON.
    Status,
    /// Destroy the host view and exit.
    Destroy,
    Quit,
    Help,
}

pub const HELP: &str = "\
commands:
  toggle          press Start/Stop Capture
  approve | deny  answer the consent dialog
  cancel          dismiss the consent dialog
  resize WxH      change the output view size (0x0 = not laid out)
  status          print controller state as JSON
  destroy         tear the view down and exit
  help | ?        show this list
  quit            exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "toggle" | "t" => Command::Toggle,
        "approve" | "allow" | "y" => Command::Approve,
        "deny" | "n" => Command::Deny,
        "cancel" => Command::Cancel,
        "resize" => {
            let arg = words.next().ok_or("usage: resize WxH")?;
            Command::Resize(parse_size(arg)?)
        }
        "status" | "s" => Command::Status,
        "destroy" => Command::Destroy,
        "quit" | "exit" | "q" => Command::Quit,
        "help" | "?" => Command::Help,
        other => return Err(format!("unknown command: {}", other)),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {}", extra));
    }
    Ok(Some(command))
}

/// Parse `WIDTHxHEIGHT`, e.g. `1080x2400`.
pub fn parse_size(text: &str) -> Result<SurfaceSize, String> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {:?}", text))?;
    let width = w.trim().parse().map_err(|_| format!("bad width: {:?}", w))?;
    let height = h.trim().parse().map_err(|_| format!("bad height: {:?}", h))?;
    Ok(SurfaceSize::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_and_aliases() {
        assert_eq!(parse_command("toggle"), Ok(Some(Command::Toggle)));
        assert_eq!(parse_command("  T  "), Ok(Some(Command::Toggle)));
        assert_eq!(parse_command("allow"), Ok(Some(Command::Approve)));
        assert_eq!(parse_command("deny"), Ok(Some(Command::Deny)));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn help_lists_every_verb() {
        for verb in ["toggle", "approve", "deny", "cancel", "resize", "status", "destroy", "help", "quit"] {
            assert!(HELP.contains(verb), "help text is missing {}", verb);
            assert!(parse_command(verb).is_ok() || verb == "resize");
        }
        assert_eq!(parse_command("?"), Ok(Some(Command::Help)));
    }

    #[test]
    fn blank_line_is_not_a_command() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn resize_takes_dimensions() {
        assert_eq!(
            parse_command("resize 720x1280"),
            Ok(Some(Command::Resize(SurfaceSize::new(720, 1280))))
        );
        assert_eq!(
            parse_command("resize 0X0"),
            Ok(Some(Command::Resize(SurfaceSize::new(0, 0))))
        );
        assert!(parse_command("resize").is_err());
        assert!(parse_command("resize 720").is_err());
        assert!(parse_command("resize -1x5").is_err());
    }

    #[test]
    fn rejects_unknown_and_trailing_words() {
        assert_eq!(
            parse_command("record"),
            Err("unknown command: record".to_string())
        );
        assert!(parse_command("toggle now").is_err());
    }
}
