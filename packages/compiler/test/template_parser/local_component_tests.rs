/**
 * Local Component Tests
 *
 * Prop typing and validation of child components used in templates
 */

#[cfg(test)]
mod tests {
    use template_compiler::{
        compile_template, CompilationResult, CompilerConfig, ComponentInfo, LocalComponent,
        LocalComponentProp, NullLogger, TemplateParserContext, TypeRef,
    };

    fn context() -> TemplateParserContext {
        let component = ComponentInfo::new("com.example.TodoList")
            .with_property("current", TypeRef::Dynamic)
            .with_property("title", TypeRef::string())
            .with_method("select");
        let mut ctx = TemplateParserContext::new(component);
        ctx.add_import("com.example.Todo");
        ctx.add_local_component(
            LocalComponent::new("TodoItem")
                .with_prop(LocalComponentProp::new("todo", TypeRef::named("Todo"), true))
                .with_prop(LocalComponentProp::new("todoText", TypeRef::named("String"), true))
                .with_prop(LocalComponentProp::new("priority", TypeRef::int(), false)),
        );
        ctx
    }

    fn compile(template: &str) -> CompilationResult {
        compile_template(template, &mut context(), &CompilerConfig::default(), &NullLogger)
            .expect("Should compile")
    }

    fn messages(result: &CompilationResult) -> Vec<&str> {
        result.diagnostics.iter().map(|d| d.msg.as_str()).collect()
    }

    #[test]
    fn prop_bindings_take_the_prop_type() {
        let result = compile(r#"<todo-item :todo="(Todo) current" todo-text="Buy milk"></todo-item>"#);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(
            result.processed_template,
            r#"<todo-item :todo="exp0()" todo-text="Buy milk"></todo-item>"#
        );

        let expression = &result.expressions[0];
        assert!(expression.is_prop_bound);
        assert_eq!(expression.return_type.to_string(), "com.example.Todo");
        // The cast stays: the prop decides the type
        assert_eq!(expression.text, "(com.example.Todo) current");
    }

    #[test]
    fn prop_bindings_are_never_passed_through() {
        let result = compile(r#"<todo-item :todo="current" v-bind:todo-text="title"></todo-item>"#);
        assert!(result.passthrough_bindings.is_empty());
        assert_eq!(result.expressions.len(), 2);
        assert_eq!(result.expressions[1].return_type, TypeRef::string());
        assert!(result.expressions.iter().all(|e| e.is_prop_bound));
    }

    #[test]
    fn reports_missing_required_props() {
        let result = compile(r#"<todo-item :priority="2"></todo-item>"#);
        assert_eq!(
            messages(&result),
            vec!["Missing required property: \"todo\",\"todo-text\" on child component \"TodoItem\""]
        );
        assert_eq!(
            result.diagnostics[0].context.as_deref(),
            Some(r#"<todo-item :priority="2">"#)
        );
        let span = result.diagnostics[0].span.as_ref().unwrap();
        assert_eq!(span.start.offset, 0);
        assert_eq!(span.end.offset, 25);
    }

    #[test]
    fn single_missing_prop_is_one_diagnostic() {
        let mut ctx = context();
        ctx.add_local_component(
            LocalComponent::new("page-header")
                .with_prop(LocalComponentProp::new("title", TypeRef::string(), true)),
        );
        let result = compile_template(
            "<div><page-header></page-header>{{ title }}</div>",
            &mut ctx,
            &CompilerConfig::default(),
            &NullLogger,
        )
        .unwrap();
        assert_eq!(
            messages(&result),
            vec!["Missing required property: \"title\" on child component \"page-header\""]
        );
        assert_eq!(result.expressions.len(), 1);
    }

    #[test]
    fn reports_string_passed_to_non_string_prop() {
        let result = compile(r#"<todo-item :todo="current" todo-text="a" priority="12"></todo-item>"#);
        assert_eq!(
            messages(&result),
            vec!["Passing a String to a non String Prop: \"priority\". If you want to pass a boolean or an int you should use v-bind. For example: v-bind:my-prop=\"12\" (or using the short syntax, :my-prop=\"12\") instead of my-prop=\"12\"."]
        );
        assert_eq!(result.diagnostics[0].context.as_deref(), Some("priority=\"12\""));
    }

    #[test]
    fn is_attribute_selects_the_component() {
        let result = compile(r#"<li is="todo-item" :todo="current" :todo-text="title"></li>"#);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert!(result.expressions.iter().all(|e| e.is_prop_bound));
    }

    #[test]
    fn component_tags_match_case_insensitively() {
        let result = compile(r#"<TodoItem :todo="current" :todo-text="title"></TodoItem><TODO-ITEM></TODO-ITEM>"#);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(messages(&result)[0].starts_with("Missing required property"));
    }

    #[test]
    fn unknown_attributes_on_components_are_plain_bindings() {
        let result = compile(r#"<todo-item :todo="current" :todo-text="title" :class="title + 'x'"></todo-item>"#);
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        let class_binding = &result.expressions[2];
        assert!(!class_binding.is_prop_bound);
        assert_eq!(class_binding.return_type, TypeRef::Dynamic);
    }

    #[test]
    fn props_inside_loops_capture_loop_variables() {
        let result = compile(
            r#"<todo-item v-for="Todo todo in current" :todo="todo" :todo-text="todo.text" @select="select(todo)"></todo-item>"#,
        );
        assert!(result.diagnostics.is_empty(), "{:?}", messages(&result));
        assert_eq!(
            result.processed_template,
            r#"<todo-item v-for="todo in current" :todo="exp0(todo)" :todo-text="exp1(todo)" @select="exp2(todo)"></todo-item>"#
        );
        assert_eq!(result.expressions[0].parameters[0].type_ref.to_string(), "com.example.Todo");
    }
}
