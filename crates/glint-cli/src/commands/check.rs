//! `glint check` — compile a template file without executing it, reporting
//! a lex/parse error if the source is invalid.

use std::path::PathBuf;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub template: PathBuf,
    pub verbose: bool,
}

pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    pub fn run(&self) -> Result<()> {
        let source = std::fs::read_to_string(&self.args.template)?;
        glint::compile(&source)?;
        if self.args.verbose {
            println!("{}: OK", self.args.template.display());
        }
        Ok(())
    }
}
