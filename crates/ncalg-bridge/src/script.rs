//! Session scripts in the solver's directive language.
//!
//! A script sets up the session (field, weights, degree limit, variable
//! names, output path) and then either lists generators to complete or
//! reads a stored basis and lists elements to reduce:
//!
//! ```text
//! (noncommify)
//! (setmodulus 101)
//! (setweights 1 1 1)
//! (setmaxdeg 6)
//! (vars x y z)
//! (setoutput "/tmp/ncalg-x/out.txt")
//! (y*x + x*y);
//! (compute)
//! (end)
//! ```

use std::path::{Path, PathBuf};

/// What the solver is asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Complete generators to a Gröbner basis.
    Compute {
        /// Serialized generators, one `(expr);` each.
        generators: Vec<String>,
    },
    /// Reduce elements against a basis stored in a file.
    NormalForms {
        /// File holding the basis, one generator per line.
        basis_file: PathBuf,
        /// Hilbert-series hint telling the solver that all pairs up to
        /// this degree are already resolved.
        hseries_minima: u32,
        /// Serialized elements, one `(expr);` each.
        elements: Vec<String>,
    },
}

/// A complete session script.
#[derive(Debug, Clone)]
pub struct SessionScript {
    /// Field characteristic (0 for the rationals).
    pub characteristic: u64,
    /// Weight of each generator, in declaration order.
    pub weights: Vec<u32>,
    /// Degree the completion is truncated at.
    pub max_degree: Option<u32>,
    /// Generator names, in declaration order.
    pub variables: Vec<String>,
    /// Where the solver writes its results.
    pub output: PathBuf,
    /// The request.
    pub request: Request,
}

impl SessionScript {
    /// Renders the script text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = vec!["(noncommify)".to_string()];
        if self.characteristic != 0 {
            lines.push(format!("(setmodulus {})", self.characteristic));
        }
        lines.push(format!("(setweights {})", join(self.weights.iter())));
        if let Some(d) = self.max_degree {
            lines.push(format!("(setmaxdeg {d})"));
        }
        lines.push(format!("(vars {})", self.variables.join(" ")));
        lines.push(format!("(setoutput {})", quote(&self.output)));

        match &self.request {
            Request::Compute { generators } => {
                lines.extend(generators.iter().cloned());
                lines.push("(compute)".to_string());
            }
            Request::NormalForms {
                basis_file,
                hseries_minima,
                elements,
            } => {
                lines.push(format!("(sethseriesminima {hseries_minima})"));
                lines.push(format!("(readbasis {})", quote(basis_file)));
                lines.push("(normalform)".to_string());
                lines.extend(elements.iter().cloned());
            }
        }

        lines.push("(end)".to_string());
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn join<T: ToString>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(" ")
}

fn quote(path: &Path) -> String {
    format!("\"{}\"", path.display().to_string().replace('"', "\\\""))
}
