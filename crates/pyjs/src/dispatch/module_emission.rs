//! Module body, runtime preamble and imports.

use super::{Dispatcher, scope};
use crate::error::{Result, TranspileError};
use crate::tables::names::RUNTIME_BINDING;
use crate::tree::{Block, Expression, Fragment, Statement};
use pyjs_syntax::{Alias, Module};
use tracing::debug;

impl Dispatcher<'_> {
    /// The whole module as an unbraced block, preamble first.
    pub(super) fn module(&self, module: &Module) -> Result<Block> {
        let mut children = vec![self.binding(RUNTIME_BINDING, RUNTIME_BINDING)?];
        let inner = self.scope(scope::bound_names(&module.body));
        children.extend(inner.statements(&module.body)?);
        Ok(Block::unbraced(children))
    }

    /// `require("<adapter dir>/a/b.js")` for module `a.b`.
    fn require(&self, module: &str) -> Result<Expression> {
        let path = format!(
            "{}/{}.js",
            self.options.adapter_dir.trim_end_matches('/'),
            module.replace('.', "/")
        );
        let quoted = serde_json::to_string(&path).map_err(|err| {
            TranspileError::compilation(format!("cannot encode module path: {err}"))
        })?;
        Ok(Expression::from(format!("require({quoted})")))
    }

    fn binding(&self, pattern: &str, module: &str) -> Result<Fragment> {
        let line = Expression::from(format!("const {pattern} = ")).append(self.require(module)?);
        Ok(Statement::terminated(line).into())
    }

    /// `import a.b` binds `a`; `import a.b as c` binds `c` to `a.b`.
    pub(super) fn import(&self, names: &[Alias]) -> Result<Vec<Fragment>> {
        names
            .iter()
            .map(|alias| match &alias.asname {
                Some(asname) => self.binding(asname, &alias.name),
                None => {
                    let root = alias.name.split('.').next().unwrap_or(&alias.name);
                    self.binding(root, root)
                }
            })
            .collect()
    }

    /// One destructuring `require` per imported name. Relative imports
    /// resolve inside the adapter directory like absolute ones.
    pub(super) fn import_from(
        &self,
        module: Option<&str>,
        level: usize,
        names: &[Alias],
    ) -> Result<Vec<Fragment>> {
        if module == Some("__future__") && level == 0 {
            debug!("skipping __future__ import");
            return Ok(Vec::new());
        }
        if names.iter().any(|alias| alias.name == "*") {
            return Err(TranspileError::compilation(format!(
                "wildcard imports are not supported (from {} import *)",
                module.unwrap_or(".")
            )));
        }

        names
            .iter()
            .map(|alias| {
                let local = alias.asname.as_deref().unwrap_or(&alias.name);
                match module {
                    Some(module) => {
                        let pattern = if local == alias.name {
                            format!("{{ {local} }}")
                        } else {
                            format!("{{ {}: {local} }}", alias.name)
                        };
                        self.binding(&pattern, module)
                    }
                    // `from . import sibling` imports a module
                    None => self.binding(local, &alias.name),
                }
            })
            .collect()
    }
}
