/**
 * Binding Tests
 *
 * Expected types, events, casts, literals and pass-through of attribute bindings
 */

#[cfg(test)]
mod tests {
    use template_compiler::logging::{LogLevel, RecordingLogger};
    use template_compiler::template_parser::{BindingKind, VariableOrigin};
    use template_compiler::{
        compile_template, CompilationResult, CompilerConfig, ComponentInfo, NullLogger,
        TemplateParserContext, TypeRef,
    };

    fn context() -> TemplateParserContext {
        let component = ComponentInfo::new("com.example.Editor")
            .with_property("label", TypeRef::string())
            .with_property("visible", TypeRef::boolean())
            .with_property("count", TypeRef::int())
            .with_method("save")
            .with_method("handle");
        TemplateParserContext::new(component)
    }

    fn compile(template: &str) -> CompilationResult {
        compile_template(template, &mut context(), &CompilerConfig::default(), &NullLogger)
            .expect("Should compile")
    }

    fn messages(result: &CompilationResult) -> Vec<&str> {
        result.diagnostics.iter().map(|d| d.msg.as_str()).collect()
    }

    #[test]
    fn events_expect_void_and_capture_cast_event() {
        let result = compile(r#"<button @click="handle((MouseEvent) $event)">Go</button>"#);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(result.processed_template, r#"<button @click="exp0($event)">Go</button>"#);

        let expression = &result.expressions[0];
        assert_eq!(expression.kind, BindingKind::Event);
        assert_eq!(expression.return_type, TypeRef::Void);
        assert_eq!(expression.text, "handle((MouseEvent) $event)");
        assert_eq!(expression.parameters[0].name, "$event");
        assert_eq!(expression.parameters[0].type_ref.to_string(), "MouseEvent");
    }

    #[test]
    fn uncast_event_is_rejected() {
        let template = r#"<button v-on:click="handle($event)"></button>"#;
        let result = compile(template);
        assert!(result.expressions.is_empty());
        assert_eq!(result.processed_template, template);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(messages(&result)[0].starts_with("\"$event\" should always be casted"));
    }

    #[test]
    fn conditionals_expect_boolean() {
        let result = compile(r#"<p v-if="count > 0"></p><p v-else-if="visible && count == 0"></p><p v-else></p><p v-show="!visible"></p>"#);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(
            result.processed_template,
            r#"<p v-if="exp0()"></p><p v-else-if="exp1()"></p><p v-else></p><p v-show="exp2()"></p>"#
        );
        for expression in &result.expressions {
            assert_eq!(expression.kind, BindingKind::Conditional);
            assert_eq!(expression.return_type, TypeRef::boolean());
        }
    }

    #[test]
    fn leading_cast_gives_binding_type() {
        let result = compile(r#"<input :value="(String) label" :size="(int) count + 1" :max="((int) count) + 1">"#);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        let typed: Vec<(String, &str)> = result
            .expressions
            .iter()
            .map(|e| (e.return_type.to_string(), e.text.as_str()))
            .collect();
        assert_eq!(
            typed,
            vec![
                ("java.lang.String".to_string(), "label"),
                ("int".to_string(), "count + 1"),
                ("Any".to_string(), "((int) count) + 1"),
            ]
        );
        assert!(result.expressions.iter().all(|e| e.kind == BindingKind::AttributeBinding));
    }

    #[test]
    fn simple_bindings_pass_through() {
        let template = r#"<button @click="save" @dblclick="save()" :hidden="visible">{{ label }}</button>"#;
        let result = compile(template);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(
            result.processed_template,
            r#"<button @click="save" @dblclick="save()" :hidden="visible">{{ exp0() }}</button>"#
        );
        let passthrough: Vec<(&str, BindingKind)> = result
            .passthrough_bindings
            .iter()
            .map(|b| (b.text.as_str(), b.kind))
            .collect();
        assert_eq!(
            passthrough,
            vec![
                ("save", BindingKind::Event),
                ("save()", BindingKind::Event),
                ("visible", BindingKind::AttributeBinding),
            ]
        );
    }

    #[test]
    fn string_targets_always_get_an_expression() {
        let result = compile(r#"<p :hidden="save()" :title="save">{{ save() }}</p>"#);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(result.passthrough_bindings.len(), 2);
        let texts: Vec<&str> = result.expressions.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["save()"]);
        assert!(result.expressions.iter().all(|e| e.return_type.is_string()));
    }

    #[test]
    fn boolean_cast_on_plain_binding() {
        let result = compile(r#"<p :data-flag="(boolean) visible"></p>"#);
        assert_eq!(result.expressions.len(), 1);
        assert_eq!(result.expressions[0].return_type, TypeRef::boolean());
        assert_eq!(result.expressions[0].text, "visible");
    }

    #[test]
    fn pass_through_can_be_disabled() {
        let config = CompilerConfig {
            optimize_simple_bindings: false,
            ..CompilerConfig::default()
        };
        let result = compile_template(r#"<p :hidden="visible"></p>"#, &mut context(), &config, &NullLogger)
            .unwrap();
        assert_eq!(result.processed_template, r#"<p :hidden="exp0()"></p>"#);
        assert!(result.passthrough_bindings.is_empty());
    }

    #[test]
    fn bare_event_parameter_is_never_passed_through() {
        let mut ctx = context();
        ctx.push_scope();
        ctx.add_local_variable(TypeRef::named("Event"), "$event");
        let result =
            compile_template(r#"<a @click="$event"></a>"#, &mut ctx, &CompilerConfig::default(), &NullLogger)
                .unwrap();
        assert!(result.passthrough_bindings.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn object_and_array_literals_are_reported() {
        let template = r#"<p :style="{ color: label }" :items="[label, label]"></p>"#;
        let result = compile(template);
        assert_eq!(result.processed_template, template);
        let messages = messages(&result);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Object literal syntax are not supported yet in Vue GWT"));
        assert!(messages[1].starts_with("Array literal syntax are not supported yet in Vue GWT"));
    }

    #[test]
    fn empty_bindings_are_reported_where_a_value_is_needed() {
        let result = compile(r#"<p :title="" @click=" " v-if=""></p><p v-else v-cloak></p>"#);
        assert_eq!(
            messages(&result),
            vec![
                "Empty expression in template property binding. If you want to pass an empty string then simply don't use binding: my-attribute=\"\"",
                "Empty expression in template event binding.",
                "Empty expression in template conditional directive.",
            ]
        );
        assert!(result.expressions.is_empty());
    }

    #[test]
    fn empty_interpolation_is_reported() {
        let result = compile("<p>{{   }}</p>");
        assert_eq!(messages(&result), vec!["Empty expression in template interpolation."]);
    }

    #[test]
    fn model_bindings_are_left_alone() {
        let template = r#"<input v-model="label"><input v-model.trim="label">"#;
        let result = compile(template);
        assert_eq!(result.processed_template, template);
        assert!(result.expressions.is_empty());
        assert!(result.passthrough_bindings.is_empty());
    }

    #[test]
    fn rewritten_values_keep_attribute_quotes() {
        let result = compile(r#"<p :title='label + "!"' :alt="label + '?'"></p>"#);
        assert_eq!(
            result.processed_template,
            r#"<p :title='exp0()' :alt="exp1()"></p>"#
        );
        assert_eq!(result.expressions[0].text, r#"label + "!""#);
        assert_eq!(result.expressions[1].text, "label + '?'");
    }

    #[test]
    fn entity_encoded_values_are_decoded() {
        let result = compile(r#"<p v-if="visible &amp;&amp; count &gt; 1"></p>"#);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(result.expressions[0].text, "visible && count > 1");
    }

    #[test]
    fn object_creation_types_are_qualified() {
        let mut ctx = context();
        ctx.add_import("com.example.Point");
        let result = compile_template(
            r#"<p :title="new Point(count, 2).toString()"></p>"#,
            &mut ctx,
            &CompilerConfig::default(),
            &NullLogger,
        )
        .unwrap();
        assert_eq!(result.expressions[0].text, "new com.example.Point(count, 2).toString()");
    }

    #[test]
    fn loop_variables_shadow_component_properties() {
        let result = compile(r#"<p v-for="int count in 3">{{ count }}</p>"#);
        let interpolation = result.expressions.last().unwrap();
        assert_eq!(interpolation.parameters.len(), 1);
        assert_eq!(interpolation.parameters[0].name, "count");
    }

    #[test]
    fn accepted_expressions_are_logged_at_debug() {
        let logger = RecordingLogger::new(LogLevel::Debug);
        compile_template(r#"<p @click="save">{{ label }}</p>"#, &mut context(), &CompilerConfig::default(), &logger)
            .unwrap();
        let debug = logger.messages(LogLevel::Debug);
        assert!(debug.iter().any(|m| m.contains("Passing \"save\" through unprocessed")));
        assert!(debug.iter().any(|m| m.starts_with("Added expression exp0")));
    }

    #[test]
    fn event_parameter_origin_is_recorded_by_the_processor() {
        let ctx = context();
        let expression = template_compiler::expression_parser::Parser::new()
            .parse_expression("handle((KeyboardEvent) $event)")
            .unwrap();
        let processed = template_compiler::template_parser::expression_processor::ExpressionProcessor::new(&ctx, "$event")
            .process(expression, false);
        assert_eq!(processed.parameters[0].origin, VariableOrigin::EventParameter);
    }
}
