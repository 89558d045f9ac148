/// How the host asked the screen saver to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaverMode {
    /// Show the controls text. Also what an argument-less launch does.
    Config,
    Run,
    /// Draw inside the host's preview window, identified by its handle.
    Preview { parent: usize },
}

/// Parses `/s`, `/c`, `/p <handle>` and `/p:<handle>`, case-insensitively,
/// with `-` accepted in place of `/`. Anything unrecognized runs.
pub fn parse_saver_args<I, S>(args: I) -> SaverMode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let Some(first) = args.next() else {
        return SaverMode::Config;
    };
    let first = first.as_ref().to_ascii_lowercase();
    let flag = first
        .strip_prefix(['/', '-'])
        .unwrap_or(first.as_str());

    if flag.starts_with('s') {
        SaverMode::Run
    } else if flag.starts_with('c') {
        SaverMode::Config
    } else if flag.starts_with('p') {
        let parent = match flag.split_once(':') {
            Some((_, handle)) if !handle.is_empty() => parse_handle(handle),
            _ => args.next().map_or(0, |handle| parse_handle(handle.as_ref())),
        };
        SaverMode::Preview { parent }
    } else {
        SaverMode::Run
    }
}

/// Decimal or `0x` hexadecimal window handle; zero when unparseable.
pub fn parse_handle(text: &str) -> usize {
    let text = text.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.unwrap_or(0)
}
