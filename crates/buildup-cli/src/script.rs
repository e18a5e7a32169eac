//! Event scripts for `buildup run`.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! select wall-type masonry
//! select inner-leaf dense
//! pointer 640 400
//! orbit 0.3 0
//! frames 60
//! clear wall-type
//! ```

use std::cmp::Ordering;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use buildup::{RenderAdapter, SelectionField, UiSurface, Viewer, ViewerError};
use buildup_math::Point2;

/// One scripted UI event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Change a selection control.
    Select {
        /// Control that changed.
        field: SelectionField,
        /// New value.
        value: String,
    },
    /// Reset a selection control to its placeholder.
    Clear(SelectionField),
    /// Move the pointer to a screen position.
    Pointer { x: f64, y: f64 },
    /// Resize the drawing area.
    Resize { width: f64, height: f64 },
    /// Queue an orbit rotation, in radians.
    Orbit { d_theta: f64, d_phi: f64 },
    /// Queue a dolly.
    Dolly(f64),
    /// Run display frames.
    Frames(u64),
}

/// An event with the 1-based script line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    /// Line number in the script.
    pub line: usize,
    /// Parsed event.
    pub event: Event,
}

/// A scripted selection the viewer refused.
#[derive(Debug)]
pub struct Rejected {
    /// Line number in the script.
    pub line: usize,
    /// Why the viewer refused it.
    pub error: ViewerError,
}

fn field(raw: &str) -> Result<SelectionField> {
    SelectionField::from_str(raw).map_err(|e| anyhow!(e))
}

fn number<T: FromStr>(raw: &str, what: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse().with_context(|| format!("invalid {what} '{raw}'"))
}

fn arity(verb: &str, args: &[&str], expected: usize) -> Result<()> {
    match args.len().cmp(&expected) {
        Ordering::Less => bail!("'{verb}' needs {expected} argument(s)"),
        Ordering::Greater => bail!("unexpected argument '{}'", args[expected]),
        Ordering::Equal => Ok(()),
    }
}

/// Parse one line. Returns `None` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Event>> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Ok(None);
    };

    let event = match verb {
        "select" => {
            if args.len() < 2 {
                bail!("'select' needs a field and a value");
            }
            Event::Select {
                field: field(args[0])?,
                value: args[1..].join(" "),
            }
        }
        "clear" => {
            arity(verb, args, 1)?;
            Event::Clear(field(args[0])?)
        }
        "pointer" => {
            arity(verb, args, 2)?;
            Event::Pointer {
                x: number(args[0], "x")?,
                y: number(args[1], "y")?,
            }
        }
        "resize" => {
            arity(verb, args, 2)?;
            Event::Resize {
                width: number(args[0], "width")?,
                height: number(args[1], "height")?,
            }
        }
        "orbit" => {
            arity(verb, args, 2)?;
            Event::Orbit {
                d_theta: number(args[0], "azimuth delta")?,
                d_phi: number(args[1], "polar delta")?,
            }
        }
        "dolly" => {
            arity(verb, args, 1)?;
            Event::Dolly(number(args[0], "scale")?)
        }
        "frames" => {
            arity(verb, args, 1)?;
            Event::Frames(number(args[0], "frame count")?)
        }
        other => bail!("unknown command '{other}'"),
    };

    Ok(Some(event))
}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if let Some(event) = parse_line(line).with_context(|| format!("line {}", n + 1))? {
            lines.push(ScriptLine { line: n + 1, event });
        }
    }
    Ok(lines)
}

/// Feed `script` to `viewer`, collecting the selections it refused.
///
/// A refused selection leaves the wall on screen as it was; replay carries
/// on with the next line.
pub fn replay<A: RenderAdapter, U: UiSurface>(
    viewer: &mut Viewer<A, U>,
    script: &[ScriptLine],
) -> Vec<Rejected> {
    let mut rejected = Vec::new();
    for ScriptLine { line, event } in script {
        let outcome = match event {
            Event::Select { field, value } => viewer.on_selection_changed(*field, value).map(drop),
            Event::Clear(field) => viewer.on_selection_changed(*field, "").map(drop),
            Event::Pointer { x, y } => {
                viewer.on_pointer_move(Point2::new(*x, *y));
                Ok(())
            }
            Event::Resize { width, height } => {
                viewer.on_resize(*width, *height);
                Ok(())
            }
            Event::Orbit { d_theta, d_phi } => {
                viewer.orbit(*d_theta, *d_phi);
                Ok(())
            }
            Event::Dolly(scale) => {
                viewer.dolly(*scale);
                Ok(())
            }
            Event::Frames(count) => {
                viewer.run_frames(*count);
                Ok(())
            }
        };
        if let Err(error) = outcome {
            rejected.push(Rejected { line: *line, error });
        }
    }
    rejected
}
