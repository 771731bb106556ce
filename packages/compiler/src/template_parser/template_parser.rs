//! Template Parser
//!
//! Walks the element tree of a template depth-first, compiles every
//! binding site and rewrites the template in place. Only a malformed
//! expression or `v-for` definition aborts the compile, every other problem
//! becomes a diagnostic on the result.

use once_cell::sync::Lazy;
use regex::Regex;

use super::binding_parser::{classify_attribute, expected_type_for_attribute, AttributeKind};
use super::context::TemplateParserContext;
use super::expression_processor::ExpressionProcessor;
use super::local_components::{LocalComponent, LocalComponentProp};
use super::loop_definition::LoopDefinition;
use super::output_document::OutputDocument;
use super::result::{BindingKind, CompilationResult, PassthroughBinding};
use crate::config::CompilerConfig;
use crate::error::Result;
use crate::expression_parser::{serialize, Parser};
use crate::logging::Logger;
use crate::ml_parser::{self, visit_all_elements, Attribute, Element, Node, Text};
use crate::parse_util::{AbsoluteSourceSpan, ParseSourceFile, ParseSourceSpan, TemplateDiagnostic};
use crate::types::TypeRef;

static MUSTACHE_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{.*?\}\}").unwrap());

const DEFAULT_TEMPLATE_URL: &str = "template.html";

const OBJECT_LITERAL_MESSAGE: &str = "Object literal syntax are not supported yet in Vue GWT, please use map(e(\"key1\", myValue), e(\"key2\", myValue2 > 5)...) instead. The object returned by map() is a regular Javascript Object (JsObject) with the given key/values.";
const ARRAY_LITERAL_MESSAGE: &str = "Array literal syntax are not supported yet in Vue GWT, please use array(myValue, myValue2 > 5...) instead. The object returned by array() is a regular Javascript Array (JsArray) with the given values.";

/// Compile `template` against `context`
pub fn compile_template(
    template: &str,
    context: &mut TemplateParserContext,
    config: &CompilerConfig,
    logger: &dyn Logger,
) -> Result<CompilationResult> {
    TemplateParser::new(config, logger).parse_html_template(template, context)
}

pub struct TemplateParser<'a> {
    config: &'a CompilerConfig,
    logger: &'a dyn Logger,
    expression_parser: Parser,
}

impl<'a> TemplateParser<'a> {
    pub fn new(config: &'a CompilerConfig, logger: &'a dyn Logger) -> Self {
        TemplateParser {
            config,
            logger,
            expression_parser: Parser::new(),
        }
    }

    pub fn parse_html_template(
        &self,
        template: &str,
        context: &mut TemplateParserContext,
    ) -> Result<CompilationResult> {
        self.parse_html_template_at(DEFAULT_TEMPLATE_URL, template, context)
    }

    /// `url` only appears in diagnostic locations
    pub fn parse_html_template_at(
        &self,
        url: &str,
        template: &str,
        context: &mut TemplateParserContext,
    ) -> Result<CompilationResult> {
        for import in &self.config.implicit_imports {
            context.add_implicit_import(import);
        }

        let mut compilation = TemplateCompilation {
            parser: self,
            context,
            source: template,
            source_file: ParseSourceFile::new(template, url),
            output: OutputDocument::new(template),
            result: CompilationResult::new(),
        };

        let tree = ml_parser::Parser::new().parse(template);
        for error in &tree.errors {
            compilation.report_markup_error(error);
        }

        compilation.process_imports(&tree.root_nodes);
        compilation.process_nodes(&tree.root_nodes)?;

        let TemplateCompilation {
            output, mut result, ..
        } = compilation;
        result.processed_template = output.render();
        self.logger.debug(&format!(
            "Compiled {}: {} expressions, {} diagnostics",
            url,
            result.expressions.len(),
            result.diagnostics.len()
        ));
        Ok(result)
    }
}

/// Where an expression was found and what it must produce
struct BindingSite<'s> {
    kind: BindingKind,
    attribute_kind: Option<AttributeKind>,
    prop: Option<&'s LocalComponentProp>,
    expected_type: TypeRef,
    span: AbsoluteSourceSpan,
}

/// State of one template compile
struct TemplateCompilation<'p, 'c, 's> {
    parser: &'p TemplateParser<'p>,
    context: &'c mut TemplateParserContext,
    source: &'s str,
    source_file: ParseSourceFile,
    output: OutputDocument<'s>,
    result: CompilationResult,
}

impl<'p, 'c, 's> TemplateCompilation<'p, 'c, 's> {
    fn config(&self) -> &'p CompilerConfig {
        self.parser.config
    }

    fn logger(&self) -> &'p dyn Logger {
        self.parser.logger
    }

    fn report(&mut self, msg: impl Into<String>, context: Option<&str>, span: AbsoluteSourceSpan) {
        let mut diagnostic = TemplateDiagnostic::error(msg)
            .with_span(ParseSourceSpan::from_absolute(&self.source_file, span));
        if let Some(context) = context {
            diagnostic = diagnostic.with_context(context);
        }
        self.push_diagnostic(diagnostic);
    }

    fn push_diagnostic(&mut self, diagnostic: TemplateDiagnostic) {
        self.logger().error(&diagnostic.to_string());
        self.result.diagnostics.push(diagnostic);
    }

    fn report_markup_error(&mut self, error: &ml_parser::TreeError) {
        let mut span = ParseSourceSpan::from_absolute(&self.source_file, error.span);
        if let Some(element_name) = &error.element_name {
            span = span.with_details(format!("in <{}>", element_name));
        }
        if self.config().lenient_markup {
            self.logger().warn(&format!("{}: {}", error.msg, span.start));
        } else {
            self.push_diagnostic(TemplateDiagnostic::error(error.msg.clone()).with_span(span));
        }
    }

    fn source_text(&self, span: AbsoluteSourceSpan) -> &'s str {
        &self.source[span.start..span.end]
    }

    fn is_import_element(&self, element: &Element) -> bool {
        element.name.eq_ignore_ascii_case(&self.config().import_element)
    }

    /// Register the template's imports and drop their elements from the output
    fn process_imports(&mut self, nodes: &[Node]) {
        let mut import_elements = Vec::new();
        visit_all_elements(nodes, &mut |element| {
            if self.is_import_element(element) {
                import_elements.push(element);
            }
        });

        for element in import_elements {
            if let Some(class) = element.attr("class") {
                self.context.add_import(&class.value);
                self.logger().debug(&format!("Imported class {}", class.value.trim()));
            }
            if let Some(member) = element.attr("static") {
                self.context.add_static_import(&member.value);
                self.logger().debug(&format!("Imported static member {}", member.value.trim()));
            }
            self.output.remove(element.source_span);
        }
    }

    fn process_nodes(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => self.process_text_node(text)?,
                Node::Element(element) if !self.is_import_element(element) => {
                    self.process_element(element)?
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Run `f` in a fresh scope, popped on every exit path
    fn in_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        self.context.push_scope();
        let result = f(self);
        self.context.pop_scope();
        result
    }

    fn process_element(&mut self, element: &Element) -> Result<()> {
        match element.attr("v-for") {
            Some(loop_attribute) => self.in_scope(|this| {
                this.process_loop(loop_attribute)?;
                this.process_element_content(element)
            }),
            None => self.process_element_content(element),
        }
    }

    /// Attributes first, then this element's own text, then children
    fn process_element_content(&mut self, element: &Element) -> Result<()> {
        self.process_element_attributes(element)?;
        for text in element.text_children() {
            self.process_text_node(text)?;
        }
        for child in element.child_elements() {
            if !self.is_import_element(child) {
                self.process_element(child)?;
            }
        }
        Ok(())
    }

    fn process_loop(&mut self, attribute: &Attribute) -> Result<()> {
        let definition = LoopDefinition::parse(&attribute.value, self.context)?;
        for variable in &definition.variables {
            self.context
                .add_local_variable(variable.type_ref.clone(), &variable.name);
        }
        self.logger().debug(&format!(
            "Entered loop scope with {}",
            definition.variable_definition
        ));

        let site = BindingSite {
            kind: BindingKind::LoopIterable,
            attribute_kind: Some(AttributeKind::Loop),
            prop: None,
            expected_type: definition.in_expression_type.clone(),
            span: attribute.value_span.unwrap_or(attribute.source_span),
        };
        let processed = self.process_expression(&definition.in_expression, &site)?;
        self.replace_attribute_value(attribute, definition.to_template_text(&processed));
        Ok(())
    }

    fn local_component_for_element(&self, element: &Element) -> Option<LocalComponent> {
        let component_name = element
            .attr("is")
            .map(|is| is.value.as_str())
            .unwrap_or(&element.name);
        self.context.get_local_component(component_name).cloned()
    }

    fn process_element_attributes(&mut self, element: &Element) -> Result<()> {
        let local_component = self.local_component_for_element(element);
        let props: Vec<LocalComponentProp> = local_component
            .as_ref()
            .map(|component| {
                component
                    .props
                    .iter()
                    .map(|prop| {
                        let mut prop = prop.clone();
                        prop.type_ref = self.context.qualify_type(&prop.type_ref);
                        prop
                    })
                    .collect()
            })
            .unwrap_or_default();
        let mut found_props: Vec<&str> = Vec::new();

        for attribute in &element.attrs {
            let attribute_kind = classify_attribute(&attribute.name);
            if matches!(attribute_kind, AttributeKind::Loop | AttributeKind::Model) {
                continue;
            }

            let prop = local_component
                .as_ref()
                .and_then(|component| component.prop_for_attribute(&attribute.name))
                .and_then(|matched| props.iter().find(|p| p.prop_name == matched.prop_name));
            if let Some(prop) = prop {
                found_props.push(&prop.prop_name);
            }

            if attribute_kind == AttributeKind::Plain {
                if let Some(prop) = prop {
                    self.validate_string_prop_binding(prop, attribute);
                }
                continue;
            }

            let site = BindingSite {
                kind: attribute_kind.binding_kind(),
                attribute_kind: Some(attribute_kind),
                prop,
                expected_type: expected_type_for_attribute(attribute_kind, prop),
                span: attribute.value_span.unwrap_or(attribute.source_span),
            };
            let processed = self.process_expression(&attribute.value, &site)?;
            self.replace_attribute_value(attribute, processed);
        }

        if let Some(component) = &local_component {
            self.validate_required_props(component, &found_props, element);
        }
        Ok(())
    }

    fn replace_attribute_value(&mut self, attribute: &Attribute, processed: String) {
        let Some(value_span) = attribute.value_span else {
            return;
        };
        if processed == attribute.value {
            return;
        }
        let escaped = match attribute.quote {
            Some('"') => processed.replace('"', "&quot;"),
            Some('\'') => processed.replace('\'', "&#39;"),
            _ => processed,
        };
        self.output.replace(value_span, escaped);
    }

    fn validate_string_prop_binding(&mut self, prop: &LocalComponentProp, attribute: &Attribute) {
        if prop.type_ref.is_string() {
            return;
        }
        let context = self.source_text(attribute.source_span);
        self.report(
            format!(
                "Passing a String to a non String Prop: \"{}\". If you want to pass a boolean or an int you should use v-bind. For example: v-bind:my-prop=\"12\" (or using the short syntax, :my-prop=\"12\") instead of my-prop=\"12\".",
                prop.prop_name
            ),
            Some(context),
            attribute.source_span,
        );
    }

    fn validate_required_props(
        &mut self,
        component: &LocalComponent,
        found_props: &[&str],
        element: &Element,
    ) {
        let missing: Vec<String> = component
            .required_props()
            .filter(|prop| !found_props.contains(&prop.prop_name.as_str()))
            .map(|prop| format!("\"{}\"", prop.attribute_name()))
            .collect();
        if missing.is_empty() {
            return;
        }
        self.report(
            format!(
                "Missing required property: {} on child component \"{}\"",
                missing.join(","),
                component.tag_name
            ),
            Some(self.source_text(element.start_source_span)),
            element.start_source_span,
        );
    }

    /// Compile every `{{ }}` marker of a text node
    fn process_text_node(&mut self, text: &Text) -> Result<()> {
        for marker in MUSTACHE_REGEXP.find_iter(&text.value) {
            let inner_start = text.source_span.start + marker.start() + 2;
            let inner_end = text.source_span.start + marker.end() - 2;
            let inner = &marker.as_str()[2..marker.as_str().len() - 2];

            let site = BindingSite {
                kind: BindingKind::Interpolation,
                attribute_kind: None,
                prop: None,
                expected_type: TypeRef::string(),
                span: AbsoluteSourceSpan::new(inner_start, inner_end),
            };
            let processed = self.process_expression(inner, &site)?;
            if processed != inner.trim() {
                self.output.replace(
                    AbsoluteSourceSpan::new(inner_start, inner_end),
                    format!(" {} ", processed),
                );
            }
        }
        Ok(())
    }

    /// Compile one binding site, returning the text to put in its place
    fn process_expression(&mut self, text: &str, site: &BindingSite) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            if let Some(message) = empty_expression_message(site) {
                let context = self.source_text(site.span);
                self.report(message, Some(context), site.span);
            }
            return Ok(String::new());
        }

        if text.starts_with('{') {
            self.report(OBJECT_LITERAL_MESSAGE, Some(text), site.span);
            return Ok(text.to_string());
        }
        if text.starts_with('[') {
            self.report(ARRAY_LITERAL_MESSAGE, Some(text), site.span);
            return Ok(text.to_string());
        }

        if self.should_skip_expression_processing(text, site) {
            self.logger()
                .debug(&format!("Passing \"{}\" through unprocessed", text));
            self.result.passthrough_bindings.push(PassthroughBinding {
                text: text.to_string(),
                kind: site.kind,
            });
            return Ok(text.to_string());
        }

        self.process_java_expression(text, site)
    }

    /// Bindings naming a known variable or no-arg method can stay as they
    /// are, unless a prop or a String needs the full treatment
    fn should_skip_expression_processing(&self, text: &str, site: &BindingSite) -> bool {
        self.config().optimize_simple_bindings
            && site.prop.is_none()
            && !site.expected_type.is_string()
            && text != self.config().event_parameter
            && self.is_simple_expression(text)
    }

    fn is_simple_expression(&self, text: &str) -> bool {
        let method_name = text.strip_suffix("()").unwrap_or(text);
        self.context.has_method(method_name) || self.context.find_variable(text).is_some()
    }

    fn process_java_expression(&mut self, text: &str, site: &BindingSite) -> Result<String> {
        let expression = match self.expression_parser().parse_expression(text) {
            Ok(expression) => expression,
            Err(error) => {
                let location = ParseSourceSpan::from_absolute(&self.source_file, site.span);
                self.logger()
                    .error(&format!("{}: {}", error, location.start));
                return Err(error);
            }
        };

        let processed = ExpressionProcessor::new(self.context, &self.config().event_parameter)
            .process(expression, site.prop.is_none());

        if !processed.errors.is_empty() {
            for error in processed.errors {
                self.report(error, Some(text), site.span);
            }
            return Ok(text.to_string());
        }

        let return_type = processed
            .cast_type
            .unwrap_or_else(|| site.expected_type.clone());
        let prefix = &self.config().expression_prefix;
        let logger = self.logger();
        let expression = self.result.add_expression(
            prefix,
            serialize(&processed.expression),
            return_type,
            site.prop.is_some(),
            site.kind,
            &processed.parameters,
        );
        logger.debug(&format!(
            "Added expression {}: {} -> {}",
            expression.id, expression.text, expression.return_type
        ));
        Ok(expression.to_template_string())
    }

    fn expression_parser(&self) -> &'p Parser {
        &self.parser.expression_parser
    }
}

fn empty_expression_message(site: &BindingSite) -> Option<&'static str> {
    match site.attribute_kind {
        Some(AttributeKind::PropertyBinding) => Some(
            "Empty expression in template property binding. If you want to pass an empty string then simply don't use binding: my-attribute=\"\"",
        ),
        Some(AttributeKind::Event) => Some("Empty expression in template event binding."),
        Some(AttributeKind::Conditional) => Some("Empty expression in template conditional directive."),
        Some(kind) if !kind.requires_expression() => None,
        Some(_) => Some("Empty expression in template binding."),
        None if site.kind == BindingKind::Interpolation => {
            Some("Empty expression in template interpolation.")
        }
        None => None,
    }
}
