//! Text input and output for the command-line front end

use crate::error::{SortContext, SortResult};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

/// Read whitespace-separated tokens from `files` in order.
///
/// No files, or a single `-`, means standard input.
pub fn read_tokens(files: &[String]) -> SortResult<Vec<String>> {
    let mut tokens = Vec::new();

    if files.is_empty() {
        read_stdin_tokens(&mut tokens)?;
        return Ok(tokens);
    }

    for file in files {
        if file == "-" {
            read_stdin_tokens(&mut tokens)?;
        } else {
            let mut contents = String::new();
            File::open(file)
                .and_then(|mut f| f.read_to_string(&mut contents))
                .with_file_context(file)?;
            push_tokens(&contents, &mut tokens);
        }
    }

    Ok(tokens)
}

fn read_stdin_tokens(tokens: &mut Vec<String>) -> SortResult<()> {
    let mut contents = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut contents)
        .with_context(|| "reading standard input".to_string())?;
    push_tokens(&contents, tokens);
    Ok(())
}

fn push_tokens(contents: &str, tokens: &mut Vec<String>) {
    tokens.extend(contents.split_whitespace().map(str::to_string));
}

/// Open the output destination: a file when given, stdout otherwise
pub fn open_output(output_file: Option<&str>) -> SortResult<Box<dyn Write>> {
    Ok(match output_file {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_file_context(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

/// Write one value per line and flush
pub fn write_values<W, I>(out: &mut W, values: I) -> SortResult<()>
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    for value in values {
        writeln!(out, "{value}").with_context(|| "writing output".to_string())?;
    }
    out.flush().with_context(|| "flushing output".to_string())?;
    Ok(())
}
