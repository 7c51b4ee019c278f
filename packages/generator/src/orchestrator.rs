//! Batch driver
//!
//! A batch walks the declarations once, builds its registry, and emits one
//! source per decorated type as soon as that type is finished. Emitted
//! sources are never rolled back; an abort only stops the remaining types.

use crate::bootstrap::{attributes_source, ATTRIBUTES_IDENTIFIER};
use crate::collect::{collect_concrete, collect_observable};
use crate::concrete::{check_interface_base, describe_properties, synthesize_concrete};
use crate::diagnostic::Diagnostic;
use crate::error::{GenerateError, GenerateResult};
use crate::inheritance::{analyze_chain, inherit_from_batch_ancestor, AncestorChains};
use crate::model::{qualified_name, ClassDescriptor, ConcreteDescriptor, EventPolicy};
use crate::namespaces::resolve_namespaces;
use crate::naming::UniqueNames;
use crate::observable::{synthesize_observable, validate_fields};
use crate::options::GeneratorOptions;
use crate::output::GeneratorOutput;
use crate::printer::print_unit;
use crate::tree;
use propforge_syntax::{CompilationUnit, SemanticModel, TypeSymbol};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Outcome of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Output identifiers, in emission order
    pub generated: Vec<String>,
    /// Types that were not generated
    pub skipped: Vec<String>,
    pub aborted: bool,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && !self.aborted
    }
}

/// Drives generation batches against a semantic model
pub struct Generator<'m, M: SemanticModel + ?Sized> {
    model: &'m M,
    options: GeneratorOptions,
}

impl<'m, M: SemanticModel + ?Sized> Generator<'m, M> {
    pub fn new(model: &'m M, options: GeneratorOptions) -> Self {
        Self { model, options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Emit the marker attribute declarations
    pub fn generate_attributes(&self, output: &mut dyn GeneratorOutput) {
        output.add_source(ATTRIBUTES_IDENTIFIER, attributes_source(self.options.line_ending));
    }

    /// Observable-property batch over every `MakeProperty` field
    #[instrument(skip_all, fields(units = units.len()))]
    pub fn generate_observable(
        &self,
        units: &[CompilationUnit],
        output: &mut dyn GeneratorOutput,
    ) -> BatchReport {
        let registry = collect_observable(units);
        // only types that will actually be generated can own the event
        let batch: HashSet<String> = registry
            .iter()
            .filter(|(_, descriptor)| validate_fields(descriptor).is_ok())
            .map(|(key, _)| key.to_string())
            .collect();

        let mut report = BatchReport::default();
        let mut chains = AncestorChains::new();
        let mut names = UniqueNames::new();

        for (_, mut descriptor) in registry {
            let result = self.observable_unit(&mut descriptor, &batch, &mut chains);
            let proceed = self.emit(
                result,
                &descriptor.full_name(),
                &descriptor.class_name,
                &mut names,
                output,
                &mut report,
            );
            if !proceed {
                break;
            }
        }

        info!(
            generated = report.generated.len(),
            skipped = report.skipped.len(),
            aborted = report.aborted,
            "Observable batch finished"
        );
        report
    }

    /// Concrete-type batch over every `MakeConcrete` type
    #[instrument(skip_all, fields(units = units.len()))]
    pub fn generate_concrete(
        &self,
        units: &[CompilationUnit],
        output: &mut dyn GeneratorOutput,
    ) -> BatchReport {
        let registry = collect_concrete(units);
        let mut report = BatchReport::default();

        let missing = registry
            .values()
            .find(|descriptor| descriptor.arguments.mocking_type_full_name.trim().is_empty());
        if let Some(descriptor) = missing {
            let error = GenerateError::MissingInterfaceName {
                type_name: descriptor.full_name(),
            };
            warn!(type_name = %descriptor.full_name(), "Aborting concrete batch: {}", error);
            output.report(
                Diagnostic::warning(error.code(), error.to_string())
                    .with_type_name(descriptor.full_name()),
            );
            report.aborted = true;
            return report;
        }

        let mut chains = AncestorChains::new();
        let mut names = UniqueNames::new();

        for (_, mut descriptor) in registry {
            let interface_name = descriptor.arguments.mocking_type_full_name.trim().to_string();
            let Some(interface) = self.model.type_by_metadata_name(&interface_name) else {
                debug!(
                    type_name = %descriptor.full_name(),
                    interface = %interface_name,
                    "Interface not found, skipping"
                );
                report.skipped.push(descriptor.full_name());
                continue;
            };

            let result = self.concrete_unit(&mut descriptor, interface, &mut chains);
            let proceed = self.emit(
                result,
                &descriptor.full_name(),
                &descriptor.type_name,
                &mut names,
                output,
                &mut report,
            );
            if !proceed {
                break;
            }
        }

        info!(
            generated = report.generated.len(),
            skipped = report.skipped.len(),
            aborted = report.aborted,
            "Concrete batch finished"
        );
        report
    }

    /// Attributes (when enabled), then both batches
    pub fn generate_all(
        &self,
        units: &[CompilationUnit],
        output: &mut dyn GeneratorOutput,
    ) -> Vec<BatchReport> {
        if self.options.emit_attributes {
            self.generate_attributes(output);
        }
        vec![
            self.generate_observable(units, output),
            self.generate_concrete(units, output),
        ]
    }

    fn observable_unit(
        &self,
        descriptor: &mut ClassDescriptor,
        batch: &HashSet<String>,
        chains: &mut AncestorChains,
    ) -> GenerateResult<tree::CompilationUnit> {
        let hook_name = self.options.global_hook_name.as_str();
        let arity = descriptor.type_parameters.len();

        match self.model.lookup(&descriptor.full_name(), arity) {
            Some(symbol) => {
                let chain = chains.chain(self.model, symbol)?.to_vec();
                descriptor.base_type_full_names = chain.iter().map(TypeSymbol::full_name).collect();

                // the farthest decorated ancestor of this batch owns the event
                let owner = chain.iter().rposition(|ancestor| {
                    batch.contains(&qualified_name(ancestor.namespace.as_deref(), &ancestor.name))
                });
                descriptor.policy = match owner {
                    Some(position) => {
                        let owner = &chain[position];
                        let owner_chain = chains.chain(self.model, owner)?;
                        let owner_policy = analyze_chain(owner_chain, hook_name);
                        debug!(
                            type_name = %descriptor.full_name(),
                            owner = %owner.full_name(),
                            "Event generated by an ancestor in this batch"
                        );
                        inherit_from_batch_ancestor(&owner_policy)
                    }
                    None => analyze_chain(&chain, hook_name),
                };
            }
            None => {
                debug!(
                    type_name = %descriptor.full_name(),
                    "Type unknown to the semantic model, assuming no base type"
                );
                descriptor.policy = EventPolicy::new(hook_name);
            }
        }

        let scope = descriptor.scope();
        for field in &mut descriptor.fields {
            field.required_namespaces = resolve_namespaces(&field.field_type, self.model, &scope);
        }

        synthesize_observable(descriptor, &self.options)
    }

    fn concrete_unit(
        &self,
        descriptor: &mut ConcreteDescriptor,
        interface: &TypeSymbol,
        chains: &mut AncestorChains,
    ) -> GenerateResult<tree::CompilationUnit> {
        let arity = descriptor.type_parameters.len();
        if let Some(symbol) = self.model.lookup(&descriptor.full_name(), arity) {
            descriptor.base_type_full_names = chains
                .chain(self.model, symbol)?
                .iter()
                .map(TypeSymbol::full_name)
                .collect();
        }

        check_interface_base(descriptor, interface)?;
        descriptor.mocking_type_name = interface.name.clone();
        if let Some(namespace) = &interface.namespace {
            descriptor.namespaces.insert(namespace.as_str());
        }
        descriptor.properties =
            describe_properties(interface, self.model, &descriptor.arguments, &self.options)?;

        Ok(synthesize_concrete(descriptor, &self.options))
    }

    /// Register a finished unit or report its error. Returns false when
    /// the batch has to stop.
    fn emit(
        &self,
        result: GenerateResult<tree::CompilationUnit>,
        type_name: &str,
        simple_name: &str,
        names: &mut UniqueNames,
        output: &mut dyn GeneratorOutput,
        report: &mut BatchReport,
    ) -> bool {
        match result {
            Ok(unit) => {
                let identifier = names.assign(simple_name);
                debug!(type_name = %type_name, identifier = %identifier, "Generated source");
                output.add_source(&identifier, print_unit(&unit, self.options.line_ending));
                report.generated.push(identifier);
                true
            }
            Err(error) => {
                output.report(
                    Diagnostic::warning(error.code(), error.to_string()).with_type_name(type_name),
                );
                if error.skips_type() {
                    warn!(type_name = %type_name, error = %error, "Skipping type");
                    report.skipped.push(type_name.to_string());
                    true
                } else {
                    warn!(type_name = %type_name, error = %error, "Aborting batch");
                    report.aborted = true;
                    false
                }
            }
        }
    }
}
