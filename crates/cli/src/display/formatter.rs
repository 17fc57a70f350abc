use anyhow::Result;
use docexec_core::BlockOutput;

/// Render a block the way a document would show it: the output text if
/// there is any, with captured stderr on our own stderr
pub fn format_block(block: &BlockOutput) -> String {
    match &block.output {
        Some(output) if output.ends_with('\n') => output.clone(),
        Some(output) => format!("{output}\n"),
        None => String::new(),
    }
}

pub fn print_block(block: &BlockOutput) {
    print!("{}", format_block(block));
    if !block.stderr.is_empty() {
        eprint!("{}", block.stderr);
    }
    if block.cached {
        tracing::debug!("Output served from cache");
    }
}

pub fn print_block_json(block: &BlockOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(block)?);
    Ok(())
}
