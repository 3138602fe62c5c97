use rayon::prelude::*;

use crate::core::graph::{ModuleId, ModuleRegistry};
use crate::parsers::common::{
    at_ident_boundary, balanced_parens, identifier_at, occurrences, paren_list_then_semicolon,
    skip_whitespace,
};

/// Instantiations found in one module body: `(instance name, target)`.
pub type ResolvedEdges = Vec<(String, ModuleId)>;

/// Finds instantiations of registered modules inside module bodies.
///
/// An occurrence of a module name counts as an instantiation when it
/// starts at an identifier boundary and is followed by an optional
/// `#( ... )` parameter block, whitespace, an instance name and a
/// `( ... );` port list. Anything else is skipped without error.
#[derive(Debug, Clone, Default)]
pub struct DependencyResolver;

impl DependencyResolver {
    pub fn new() -> Self {
        Self
    }

    /// Instance names for every instantiation of `module_name` in `body`.
    pub fn find_instances(&self, body: &str, module_name: &str) -> Vec<String> {
        occurrences(body, module_name)
            .filter_map(|pos| self.match_instance(body, pos, module_name.len()))
            .collect()
    }

    fn match_instance(&self, body: &str, pos: usize, name_len: usize) -> Option<String> {
        if !at_ident_boundary(body, pos) {
            return None;
        }
        let bytes = body.as_bytes();
        let mut rest = pos + name_len;

        let hash = skip_whitespace(body, rest);
        if bytes.get(hash) == Some(&b'#') {
            let open = skip_whitespace(body, hash + 1);
            if bytes.get(open) == Some(&b'(') {
                // unterminated parameter block: not an instantiation
                rest = balanced_parens(body, open)?;
            }
        }

        let instance_start = skip_whitespace(body, rest);
        if instance_start == rest {
            return None;
        }
        let instance = identifier_at(body, instance_start)?;
        let ports = skip_whitespace(body, instance.end);
        paren_list_then_semicolon(body, ports, None)?;

        Some(instance.slice(body).to_string())
    }

    /// Resolve one module body against every registered name.
    ///
    /// Edges come out grouped by target name (registration order), then by
    /// position in the body. A name defined in several files yields one
    /// edge per definition.
    pub fn resolve_module(&self, body: &str, registry: &ModuleRegistry) -> ResolvedEdges {
        let mut edges = Vec::new();
        for name in registry.names() {
            let instances = self.find_instances(body, name);
            if instances.is_empty() {
                continue;
            }
            let targets: Vec<ModuleId> = registry.ids_named(name).collect();
            for instance in instances {
                edges.extend(targets.iter().map(|&target| (instance.clone(), target)));
            }
        }
        edges
    }

    /// Resolve every registered module in parallel.
    ///
    /// Only reads the registry; the caller applies the returned edges.
    pub fn resolve_all(&self, registry: &ModuleRegistry) -> Vec<(ModuleId, ResolvedEdges)> {
        let modules: Vec<_> = registry.modules().collect();
        modules
            .par_iter()
            .map(|(id, module)| (*id, self.resolve_module(&module.body, registry)))
            .collect()
    }

    /// Record resolved edges in the registry, in module order.
    pub fn apply(registry: &mut ModuleRegistry, resolved: Vec<(ModuleId, ResolvedEdges)>) -> usize {
        let mut added = 0usize;
        for (parent, edges) in resolved {
            for (instance, child) in edges {
                registry.add_instantiation(parent, child, instance);
                added += 1;
            }
        }
        added
    }
}
