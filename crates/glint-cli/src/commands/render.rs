//! `glint render` — compile a template file and execute it against
//! optional JSON data, printing the result (or writing it to a file).

use std::path::PathBuf;

use crate::commands::context_from_json;
use crate::config::Config;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

pub struct RenderCommand {
    args: RenderArgs,
    config: Config,
}

impl RenderCommand {
    pub fn new(args: RenderArgs, config: Config) -> Self {
        Self { args, config }
    }

    pub fn run(&self) -> Result<()> {
        let source = std::fs::read_to_string(&self.args.template)?;
        let data = self.load_data()?;

        let template = glint::compile(&source)?;
        let mut ctx = glint::ExecutionContext::new(data.into_map());
        let mut out = String::new();
        let result = template.execute(&mut ctx, &mut out);

        // Whatever rendered before a missing variable (or even a fatal
        // error) stays written to `out` — write it regardless of `result`
        // before deciding whether the command itself failed.
        match &self.args.output {
            Some(path) => std::fs::write(path, &out)?,
            None => print!("{out}"),
        }

        match result {
            Ok(()) => Ok(()),
            Err(err) if err.is_missing_variable() => {
                if self.config.render.warn_on_missing_variable {
                    tracing::warn!(%err, "variable lookup fell back to its placeholder");
                }
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn load_data(&self) -> Result<glint::Context> {
        match &self.args.data {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let json: serde_json::Value = serde_json::from_str(&raw)?;
                context_from_json(json)
            }
            None => Ok(glint::Context::new()),
        }
    }
}
