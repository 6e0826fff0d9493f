use caboose::CabooseError;

/// Render an error for the terminal, with a hint where one helps.
pub fn format_error(err: &anyhow::Error) -> String {
    let Some(caboose) = err.downcast_ref::<CabooseError>() else {
        return format!("[ERROR] {:#}\n", err);
    };

    let mut text = format!("[ERROR] {}\n", caboose);
    if let Some(hint) = hint(caboose.root_cause()) {
        text.push_str("  hint: ");
        text.push_str(hint);
        text.push('\n');
    }
    text
}

fn hint(err: &CabooseError) -> Option<&'static str> {
    match err {
        CabooseError::WorkerUnavailable { .. } => {
            Some("the compiler worker is not listening; check [worker] socket in caboose.toml")
        }
        CabooseError::ProcessStart { .. } => {
            Some("check [worker] command in caboose.toml, or run `caboose diagnose`")
        }
        CabooseError::InvalidPidFile { .. } => {
            Some("the pid marker did not name a process and was removed; run the command again")
        }
        CabooseError::UnsupportedAsset { .. } => Some("entries must end in .js, .coffee, .css, .sass or .scss"),
        _ => None,
    }
}
