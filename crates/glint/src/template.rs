//! Compiled templates and the top-level `Compile`/`Render` entry points.

use glint_eval::{execute, Context, ExecutionContext};
use glint_parse::Ast;

use crate::builtins::default_filters;
use crate::error::Error;

/// A compiled, immutable template.
///
/// `Template` is produced once by [`compile`] and may be executed any
/// number of times against different [`ExecutionContext`]s, including
/// concurrently from multiple threads — nothing about execution mutates
/// the template itself.
#[derive(Debug, Clone)]
pub struct Template {
    ast: Ast,
    source: String,
}

impl Template {
    /// The AST this template compiled to. Exposed mainly for tests that
    /// want to assert on parse shape without going through string output.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// The original source text this template was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Executes this template against `ctx`, writing rendered output to
    /// `out`. Returns `Err` if execution hit any problem — a fatal error,
    /// or a missing-variable output that fell back to its placeholder text
    /// (the first one, if there were several). Either way, whatever was
    /// already written to `out` stays written; read it through the `out`
    /// reference you passed in rather than assuming a non-nil error means
    /// nothing was produced.
    pub fn execute<W: std::fmt::Write>(
        &self,
        ctx: &mut ExecutionContext,
        out: &mut W,
    ) -> Result<(), Error> {
        tracing::debug!(len = self.source.len(), "executing template");
        execute(&self.ast, ctx, default_filters(), out)?;
        Ok(())
    }

    /// Convenience wrapper: executes against a fresh [`ExecutionContext`]
    /// built from `data` and returns the rendered string. A missing
    /// variable is still a non-nil `Err` here, same as [`Template::execute`]
    /// — there is just no way to recover the partial text through this
    /// wrapper's `Result<String, Error>` shape, since the buffer lives
    /// only inside this call. Use [`Template::execute`] with your own
    /// buffer if you need the rendered text despite a missing variable.
    pub fn render(&self, data: Context) -> Result<String, Error> {
        let mut ctx = ExecutionContext::new(data.into_map());
        let mut out = String::new();
        self.execute(&mut ctx, &mut out)?;
        Ok(out)
    }
}

/// Compiles `source` into a [`Template`].
///
/// Lexing and parsing happen eagerly; the returned template's AST is
/// retained and immutable for its lifetime. Any lex or parse error aborts
/// compilation.
pub fn compile(source: &str) -> Result<Template, Error> {
    tracing::debug!(len = source.len(), "compiling template");
    let ast = glint_parse::parse(source)?;
    Ok(Template {
        ast,
        source: source.to_string(),
    })
}

/// Compiles and immediately executes `source` against `data`, returning the
/// rendered string. Equivalent to `compile(source)?.render(data)`.
pub fn render(source: &str, data: Context) -> Result<String, Error> {
    compile(source)?.render(data)
}
