//! API controller artifacts.
//!
//! A controller file is the class stub filled with the allow-lists plus one
//! fragment per documented method. `index` and `show` fragments only
//! override the base controller to attach query documentation; their stubs
//! are optional like every method stub.

use std::path::PathBuf;
use tracing::debug;

use super::allow_list::{
    allowed_filters, allowed_includes, allowed_sorts, render_filters, render_names, render_sorts,
    FilterEntry, ALLOWED_FILTER_FQCN,
};
use super::example_value::{describe, php_string_literal, ExampleSynthesizer};
use super::imports::ImportRegistry;
use super::naming::{camel, headline, plural, singular, studly, ClassNames};
use super::templates::{controller_method_stub, SlotMap, StubLoader, CONTROLLER_CLASS_STUB};
use super::types::map_type;
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::model::{ControllerDef, Entity, Schema};

const JSON_RESPONSE_FQCN: &str = "Illuminate\\Http\\JsonResponse";
const REQUEST_FQCN: &str = "Illuminate\\Http\\Request";
const BODY_PARAMETER_FQCN: &str = "Dedoc\\Scramble\\Attributes\\BodyParameter";
const PATH_PARAMETER_FQCN: &str = "Dedoc\\Scramble\\Attributes\\PathParameter";
const QUERY_PARAMETER_FQCN: &str = "Dedoc\\Scramble\\Attributes\\QueryParameter";

/// Methods that get a generated fragment, in output order.
const FRAGMENT_METHODS: [&str; 5] = ["index", "show", "store", "update", "destroy"];

/// Allow-lists of one controller, shared by the class body and the query
/// documentation of `index`/`show`.
struct AllowLists {
    filters: Vec<FilterEntry>,
    sorts: Vec<String>,
    includes: Vec<String>,
}

impl AllowLists {
    fn for_model(model: Option<&Entity>) -> Self {
        Self {
            filters: allowed_filters(model),
            sorts: allowed_sorts(model),
            includes: allowed_includes(model),
        }
    }
}

/// Builds the controller artifact for one controller definition.
pub struct ControllerBuilder<'a> {
    config: &'a GeneratorConfig,
    names: ClassNames<'a>,
    stubs: &'a StubLoader,
    examples: &'a ExampleSynthesizer,
}

impl<'a> ControllerBuilder<'a> {
    pub fn new(
        config: &'a GeneratorConfig,
        stubs: &'a StubLoader,
        examples: &'a ExampleSynthesizer,
    ) -> Self {
        Self {
            config,
            names: ClassNames::new(config),
            stubs,
            examples,
        }
    }

    /// `{app_path}/Http/Controllers/{Namespace}/{Prefix}Controller.{ext}`,
    /// relative to the output root.
    pub fn relative_path(&self, controller: &ControllerDef) -> PathBuf {
        let mut path = PathBuf::from(&self.config.app_path)
            .join("Http")
            .join("Controllers");
        for part in controller.namespace.split(['\\', '/']).filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path.join(format!(
            "{}.{}",
            controller.class_name(),
            self.config.extension
        ))
    }

    /// Render the controller class.
    pub fn render(
        &self,
        schema: &Schema,
        controller: &ControllerDef,
    ) -> Result<String, GeneratorError> {
        let stub = self.stubs.load(CONTROLLER_CLASS_STUB)?;

        let model_name = studly(&singular(&controller.prefix));
        let model = schema.model_for_context(&model_name);
        let ctrl_ns = controller.namespace.replace('/', "\\");
        let lists = AllowLists::for_model(model);

        let mut imports = ImportRegistry::new();
        imports.add(JSON_RESPONSE_FQCN);
        imports.add(format!(
            "{}\\BaseApiController",
            self.names.controller_namespace("Api")
        ));
        imports.add(ALLOWED_FILTER_FQCN);

        if model.is_some() {
            imports.add(self.names.model_fqcn(&model_name));
            imports.add(self.names.resource_fqcn(&ctrl_ns, &model_name));
        }
        if controller.has_method("store") || controller.has_method("update") {
            imports.add(self.names.data_fqcn(&model_name));
            imports.add(BODY_PARAMETER_FQCN);
        }
        if controller.has_method("update") || controller.has_method("destroy") {
            imports.add(PATH_PARAMETER_FQCN);
        }

        let filters = render_filters(&lists.filters, &mut imports);
        let methods = self.render_methods(controller, &model_name, model, &lists, &mut imports)?;

        let slots = SlotMap::new()
            .with("namespace", self.names.controller_namespace(&ctrl_ns))
            .with("class", controller.class_name())
            .with("model", model_name.clone())
            .with("modelClass", format!("{model_name}::class"))
            .with(
                "resourceClass",
                format!("{}::class", self.names.resource_class(&model_name)),
            )
            .with("allowedFilters", filters)
            .with("allowedSorts", render_sorts(model))
            .with("allowedIncludes", render_names(&lists.includes))
            .with("methods", methods)
            .with("imports", imports.render());

        Ok(stub.render(&slots))
    }

    /// Method fragments joined by newlines, with a leading newline when any
    /// exist. Missing method stubs are skipped.
    fn render_methods(
        &self,
        controller: &ControllerDef,
        model_name: &str,
        model: Option<&Entity>,
        lists: &AllowLists,
        imports: &mut ImportRegistry,
    ) -> Result<String, GeneratorError> {
        let model_variable = camel(model_name);
        let mut fragments = Vec::new();

        for verb in FRAGMENT_METHODS.into_iter().filter(|m| controller.has_method(m)) {
            let stub_name = controller_method_stub(verb);
            let Some(stub) = self.stubs.find(&stub_name)? else {
                debug!(
                    stub = %stub_name,
                    controller = %controller.class_name(),
                    "Method stub not found, skipping"
                );
                continue;
            };

            let attributes = match model {
                Some(model) => self.method_attributes(verb, model, lists, imports),
                None => Vec::new(),
            };
            if verb == "index" || verb == "show" {
                imports.add(REQUEST_FQCN);
            }

            let mut slots = SlotMap::new()
                .with("modelVariable", model_variable.clone())
                .with("modelClass", model_name)
                .with("modelName", headline(model_name))
                .with("modelPlural", plural(&headline(model_name)))
                .with("resourceClass", self.names.resource_class(model_name))
                .with(format!("{verb}Attributes"), indent_attributes(&attributes));
            if verb == "store" || verb == "update" {
                slots.set("dataClass", self.names.data_class(model_name));
            }
            fragments.push(stub.render(&slots));
        }

        if fragments.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("\n{}", fragments.join("\n")))
        }
    }

    /// Documentation attributes for one method of a modelled controller.
    /// Every attribute class used is added to `imports`.
    fn method_attributes(
        &self,
        verb: &str,
        model: &Entity,
        lists: &AllowLists,
        imports: &mut ImportRegistry,
    ) -> Vec<String> {
        let model_variable = camel(&model.name);
        let mut attributes = Vec::new();

        match verb {
            "index" => attributes.extend(self.index_parameters(model, lists)),
            "show" => {
                let label = headline(&model.name).to_lowercase();
                attributes.push(format!(
                    "#[PathParameter('id', description: 'The ID of the {label} to retrieve.', type: 'integer', example: 1)]"
                ));
                attributes.extend(include_parameter(&lists.includes));
            }
            "update" | "destroy" => {
                let action = if verb == "update" { "update" } else { "delete" };
                attributes.push(format!(
                    "#[PathParameter('{model_variable}', description: 'The {model_variable} to {action}.', type: 'integer', example: 1)]"
                ));
            }
            _ => {}
        }
        if verb == "store" || verb == "update" {
            attributes.extend(self.body_parameters(model, verb));
        }

        for (marker, fqcn) in [
            ("#[PathParameter", PATH_PARAMETER_FQCN),
            ("#[QueryParameter", QUERY_PARAMETER_FQCN),
            ("#[BodyParameter", BODY_PARAMETER_FQCN),
        ] {
            if attributes.iter().any(|a| a.starts_with(marker)) {
                imports.add(fqcn);
            }
        }
        attributes
    }

    /// Query documentation for `index`: filter, sort and include built from
    /// the allow-lists, then pagination.
    fn index_parameters(&self, model: &Entity, lists: &AllowLists) -> Vec<String> {
        let mut parameters = Vec::new();

        if let Some(first) = lists.filters.first() {
            let fields = lists
                .filters
                .iter()
                .map(FilterEntry::column)
                .collect::<Vec<_>>()
                .join(", ");
            let example = match model.column(first.column()) {
                Some(column) => self
                    .examples
                    .example(&column.name, &column.data_type, Some(column)),
                None => "1".to_string(),
            };
            parameters.push(format!(
                "#[QueryParameter('filter', description: {}, type: 'object', required: false, example: [{} => {example}])]",
                php_string_literal(&format!(
                    "Filter results by field values. Use filter[field]=value format. Available fields: {fields}"
                )),
                php_string_literal(first.column()),
            ));
        }

        if let Some(first) = lists.sorts.first() {
            parameters.push(format!(
                "#[QueryParameter('sort', description: {}, type: 'string', required: false, example: {})]",
                php_string_literal(&format!(
                    "Sort results by field. Prefix with - for descending order. Available fields: {}",
                    lists.sorts.join(", ")
                )),
                php_string_literal(&format!("-{first}")),
            ));
        }

        parameters.extend(include_parameter(&lists.includes));
        parameters.push(
            "#[QueryParameter('per_page', description: 'Number of items per page for pagination.', type: 'integer', required: false, default: 15, example: 20)]"
                .to_string(),
        );
        parameters.push(
            "#[QueryParameter('page', description: 'Page number for pagination.', type: 'integer', required: false, default: 1, example: 1)]"
                .to_string(),
        );
        parameters
    }

    fn body_parameters(&self, model: &Entity, verb: &str) -> Vec<String> {
        let action = if verb == "store" { "creating" } else { "updating" };
        model
            .columns()
            .iter()
            .filter(|c| !c.is_managed() && !c.is_foreign_key())
            .map(|column| {
                let mapped = map_type(&column.name, &column.data_type);
                let mut attribute = format!(
                    "#[BodyParameter({}, description: {}, type: '{}'",
                    php_string_literal(&column.name),
                    php_string_literal(&describe(&column.name, action)),
                    mapped.doc
                );
                if let Some(format) = mapped.format {
                    attribute.push_str(&format!(", format: '{format}'"));
                }
                attribute.push_str(&format!(
                    ", required: {}, example: {})]",
                    !column.nullable,
                    self.examples
                        .example(&column.name, &column.data_type, Some(column))
                ));
                attribute
            })
            .collect()
    }
}

/// `include` query documentation; absent when nothing can be included.
fn include_parameter(includes: &[String]) -> Option<String> {
    if includes.is_empty() {
        return None;
    }
    let example = includes.iter().take(2).cloned().collect::<Vec<_>>().join(",");
    Some(format!(
        "#[QueryParameter('include', description: {}, type: 'string', required: false, example: {})]",
        php_string_literal(&format!(
            "Include related resources. Comma-separated list. Available relationships: {}",
            includes.join(", ")
        )),
        php_string_literal(&example),
    ))
}

/// Each attribute on its own line at method indentation, followed by a
/// newline. Empty when there are none.
fn indent_attributes(attributes: &[String]) -> String {
    if attributes.is_empty() {
        String::new()
    } else {
        format!("    {}\n", attributes.join("\n    "))
    }
}
