/**
 * Template Compile Tests
 *
 * End-to-end compilation of templates: rewriting, imports, loops and scopes
 */

#[cfg(test)]
mod tests {
    use template_compiler::logging::{LogLevel, RecordingLogger};
    use template_compiler::template_parser::BindingKind;
    use template_compiler::{
        compile_template, CompilationResult, CompilerConfig, CompilerError, ComponentInfo,
        NullLogger, TemplateParserContext, TypeRef,
    };

    fn todo_list() -> TemplateParserContext {
        let component = ComponentInfo::new("com.example.TodoList")
            .with_property("name", TypeRef::string())
            .with_property("todos", TypeRef::named("java.util.List<com.example.Todo>"))
            .with_property("count", TypeRef::int())
            .with_method("remove")
            .with_method("isDone");
        TemplateParserContext::new(component)
    }

    fn compile(template: &str) -> CompilationResult {
        compile_with(template, &mut todo_list(), &CompilerConfig::default())
    }

    fn compile_with(
        template: &str,
        ctx: &mut TemplateParserContext,
        config: &CompilerConfig,
    ) -> CompilationResult {
        compile_template(template, ctx, config, &NullLogger).expect("Should compile")
    }

    fn messages(result: &CompilationResult) -> Vec<&str> {
        result.diagnostics.iter().map(|d| d.msg.as_str()).collect()
    }

    #[test]
    fn template_without_bindings_is_unchanged() {
        let template = "<div class=\"a &amp; b\">\n\t<p   id='x'>Hello &lt;you&gt;</p>\n  <!-- note -->\n</div>\n";
        let result = compile(template);
        assert_eq!(result.processed_template, template);
        assert!(result.expressions.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn rewrites_interpolations() {
        let result = compile("<div>{{name}} has {{ count + 1 }} items</div>");
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(
            result.processed_template,
            "<div>{{ exp0() }} has {{ exp1() }} items</div>"
        );
        assert_eq!(result.expressions.len(), 2);
        assert_eq!(result.expressions[0].text, "name");
        assert_eq!(result.expressions[0].kind, BindingKind::Interpolation);
        assert_eq!(result.expressions[0].return_type, TypeRef::string());
        assert_eq!(result.expressions[1].text, "count + 1");
    }

    #[test]
    fn ids_follow_document_order() {
        let result = compile(r#"<p :title="count * 2">{{ name }}<span v-if="count > 1">{{ count }}</span></p>"#);
        let ids: Vec<(&str, &str)> = result
            .expressions
            .iter()
            .map(|e| (e.id.as_str(), e.text.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("exp0", "count * 2"),
                ("exp1", "name"),
                ("exp2", "count > 1"),
                ("exp3", "count"),
            ]
        );
    }

    #[test]
    fn imports_are_removed_and_applied() {
        let template = "<vue-gwt:import class=\"com.example.Todo\"/>\n<p :title=\"(Todo) todos.get(0)\"></p>";
        let mut ctx = todo_list();
        let result = compile_with(template, &mut ctx, &CompilerConfig::default());
        assert_eq!(result.processed_template, "\n<p :title=\"exp0()\"></p>");
        assert_eq!(result.expressions[0].return_type.to_string(), "com.example.Todo");
        assert_eq!(result.expressions[0].text, "todos.get(0)");
        assert!(ctx.has_import("Todo"));
    }

    #[test]
    fn static_imports_qualify_calls() {
        let template = "<vue-gwt:import static=\"com.example.Format.upper\"></vue-gwt:import><p>{{ upper(name) }}</p>";
        let result = compile(template);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(result.processed_template, "<p>{{ exp0() }}</p>");
        assert_eq!(result.expressions[0].text, "com.example.Format.upper(name)");
    }

    #[test]
    fn implicit_imports_resolve_java_lang() {
        let result = compile("<p>{{ Math.max(count, 1) + Integer.MAX_VALUE }}</p>");
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(
            result.expressions[0].text,
            "java.lang.Math.max(count, 1) + java.lang.Integer.MAX_VALUE"
        );
    }

    #[test]
    fn loop_variables_become_parameters() {
        let template = r#"<ul><li v-for="Todo todo in todos" @click="remove(todo)">{{ todo.text + todo.id }}</li></ul>"#;
        let mut ctx = todo_list();
        ctx.add_import("com.example.Todo");
        let result = compile_with(template, &mut ctx, &CompilerConfig::default());
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(
            result.processed_template,
            r#"<ul><li v-for="todo in todos" @click="exp0(todo)">{{ exp1(todo) }}</li></ul>"#
        );

        let text = &result.expressions[1];
        assert_eq!(text.parameters.len(), 1);
        assert_eq!(text.parameters[0].name, "todo");
        assert_eq!(text.parameters[0].type_ref.to_string(), "com.example.Todo");

        assert_eq!(result.passthrough_bindings.len(), 1);
        assert_eq!(result.passthrough_bindings[0].text, "todos");
        assert_eq!(result.passthrough_bindings[0].kind, BindingKind::LoopIterable);
        assert_eq!(ctx.scope_depth(), 1);
    }

    #[test]
    fn loop_with_index_and_integer_range() {
        let template = r#"<p v-for="(Todo todo, index) in todos">{{ index }}</p><i v-for="int i in 10">{{ i }}</i>"#;
        let mut ctx = todo_list();
        ctx.add_import("com.example.Todo");
        let result = compile_with(template, &mut ctx, &CompilerConfig::default());
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(
            result.processed_template,
            r#"<p v-for="(todo, index) in todos">{{ exp0(index) }}</p><i v-for="i in exp1()">{{ exp2(i) }}</i>"#
        );
        assert_eq!(result.expressions[0].parameters[0].type_ref, TypeRef::int());
        assert_eq!(result.expressions[1].kind, BindingKind::LoopIterable);
        assert_eq!(result.expressions[1].return_type, TypeRef::int());
    }

    #[test]
    fn loop_variables_do_not_leak_to_siblings() {
        let template = r#"<div><p v-for="Todo todo in todos"></p><span>{{ todo }}</span></div>"#;
        let result = compile(template);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(messages(&result)[0].starts_with("Couldn't find variable/method \"todo\""));
        assert_eq!(
            result.processed_template,
            r#"<div><p v-for="todo in todos"></p><span>{{ todo }}</span></div>"#
        );
    }

    #[test]
    fn nested_loops_see_outer_variables() {
        let template = r#"<div v-for="Todo todo in todos"><p v-for="String tag in todo.tags">{{ tag + todo.text }}</p></div>"#;
        let result = compile(template);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        let last = result.expressions.last().unwrap();
        let names: Vec<&str> = last.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["tag", "todo"]);
        assert_eq!(last.parameters[0].type_ref, TypeRef::string());
    }

    #[test]
    fn syntax_errors_abort_compilation() {
        let mut ctx = todo_list();
        let result = compile_template(
            "<li v-for=\"Todo todo in todos\">{{ todo + }}</li>",
            &mut ctx,
            &CompilerConfig::default(),
            &NullLogger,
        );
        assert!(matches!(result, Err(CompilerError::ExpressionSyntax { .. })));
        assert_eq!(ctx.scope_depth(), 1);
    }

    #[test]
    fn invalid_loop_definitions_abort_compilation() {
        let result = compile_template(
            "<li v-for=\"todos\"></li>",
            &mut todo_list(),
            &CompilerConfig::default(),
            &NullLogger,
        );
        assert!(matches!(result, Err(CompilerError::InvalidLoopDefinition { .. })));
    }

    #[test]
    fn unknown_names_are_reported_and_left_alone() {
        let result = compile("<p>{{ missing(name) }} {{ nothing }}</p>");
        assert_eq!(
            messages(&result),
            vec![
                "Couldn't find the method \"missing\". Make sure it is not private.",
                "Couldn't find variable/method \"nothing\". Make sure you didn't forget the @JsProperty/@JsMethod annotation.",
            ]
        );
        assert!(result.expressions.is_empty());
        assert_eq!(result.processed_template, "<p>{{ missing(name) }} {{ nothing }}</p>");
        assert_eq!(result.diagnostics[0].context.as_deref(), Some("missing(name)"));
    }

    #[test]
    fn markup_errors_follow_lenient_setting() {
        let template = "<div></span>{{ name }}</div>";
        let result = compile(template);
        assert!(result.diagnostics.is_empty());

        let strict = CompilerConfig {
            lenient_markup: false,
            ..CompilerConfig::default()
        };
        let result = compile_with(template, &mut todo_list(), &strict);
        assert_eq!(messages(&result), vec!["Unexpected closing tag \"span\""]);
        assert_eq!(result.expressions.len(), 1);
    }

    #[test]
    fn diagnostics_are_logged_and_serialized() {
        let logger = RecordingLogger::new(LogLevel::Debug);
        let result = compile_template(
            "<p>{{ nothing }}</p>",
            &mut todo_list(),
            &CompilerConfig::default(),
            &logger,
        )
        .unwrap();
        let errors = logger.messages(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("nothing"));

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["diagnostics"][0]["level"], "error");
        assert_eq!(json["diagnostics"][0]["span"]["url"], "template.html");
        assert_eq!(json["diagnostics"][0]["span"]["start"], 5);
    }

    #[test]
    fn custom_prefix_and_event_name() {
        let config = CompilerConfig {
            expression_prefix: "templateExpr".to_string(),
            ..CompilerConfig::default()
        };
        let result = compile_with("<p>{{ name }}</p>", &mut todo_list(), &config);
        assert_eq!(result.processed_template, "<p>{{ templateExpr0() }}</p>");
    }
}
