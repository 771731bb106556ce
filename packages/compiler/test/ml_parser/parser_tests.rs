/**
 * Markup Parser Tests
 *
 * Element tree and source spans of templates
 */

#[cfg(test)]
mod tests {
    use template_compiler::ml_parser::{Element, Node, ParseTreeResult, Parser};

    fn parse(source: &str) -> ParseTreeResult {
        Parser::new().parse(source)
    }

    fn element(node: &Node) -> &Element {
        match node {
            Node::Element(e) => e,
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn keeps_attribute_value_spans() {
        let source = r#"<todo-item :todo="todo" done></todo-item>"#;
        let result = parse(source);
        let item = element(&result.root_nodes[0]);
        assert_eq!(item.name, "todo-item");
        let binding = item.attr(":todo").unwrap();
        let span = binding.value_span.unwrap();
        assert_eq!(&source[span.start..span.end], "todo");
        assert_eq!(binding.quote, Some('"'));

        let done = item.attr("done").unwrap();
        assert_eq!(done.value, "");
        assert!(done.value_span.is_none());
    }

    #[test]
    fn decodes_entities_in_attribute_values() {
        let result = parse(r#"<p :title="a &amp;&amp; b &lt; c"></p>"#);
        let p = element(&result.root_nodes[0]);
        assert_eq!(p.attr(":title").unwrap().value, "a && b < c");
    }

    #[test]
    fn accepts_unquoted_and_single_quoted_values() {
        let result = parse("<input type=checkbox :checked='done'>");
        let input = element(&result.root_nodes[0]);
        assert_eq!(input.attr("type").unwrap().value, "checkbox");
        assert_eq!(input.attr("type").unwrap().quote, None);
        assert_eq!(input.attr(":checked").unwrap().quote, Some('\''));
        assert!(input.children.is_empty());
    }

    #[test]
    fn text_keeps_interpolations_whole() {
        let source = "<span>{{ a < b }} and {{ c }}</span>";
        let result = parse(source);
        assert!(result.errors.is_empty());
        let span = element(&result.root_nodes[0]);
        let texts: Vec<_> = span.text_children().collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].value, "{{ a < b }} and {{ c }}");
        assert_eq!(
            &source[texts[0].source_span.start..texts[0].source_span.end],
            texts[0].value
        );
    }

    #[test]
    fn self_closing_and_void_elements_have_no_children() {
        let result = parse("<div><br><my-comp/><span></span></div>");
        let div = element(&result.root_nodes[0]);
        let names: Vec<_> = div.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["br", "my-comp", "span"]);
    }

    #[test]
    fn element_spans_cover_start_and_end_tags() {
        let source = "<ul><li>a</li></ul>";
        let result = parse(source);
        let ul = element(&result.root_nodes[0]);
        assert_eq!(ul.source_span.start, 0);
        assert_eq!(ul.source_span.end, source.len());
        assert_eq!(ul.start_source_span.end, 4);
        let li = ul.child_elements().next().unwrap();
        assert_eq!(&source[li.source_span.start..li.source_span.end], "<li>a</li>");
    }

    #[test]
    fn raw_text_elements_are_opaque() {
        let result = parse("<script>if (a < b) {}</script><p></p>");
        assert_eq!(result.root_nodes.len(), 2);
        let script = element(&result.root_nodes[0]);
        assert!(script.children.is_empty());
    }

    #[test]
    fn comments_are_kept_as_nodes() {
        let result = parse("<!-- {{ nope }} --><p></p>");
        assert!(matches!(result.root_nodes[0], Node::Comment(_)));
    }

    #[test]
    fn reports_unexpected_closing_tags() {
        let result = parse("<div></span></div>");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].msg, "Unexpected closing tag \"span\"");
        assert_eq!(result.root_nodes.len(), 1);
    }

    #[test]
    fn closes_unclosed_elements() {
        let source = "<div><p>text";
        let result = parse(source);
        let div = element(&result.root_nodes[0]);
        assert_eq!(div.source_span.end, source.len());
        assert_eq!(div.child_elements().count(), 1);
    }

    #[test]
    fn tag_names_may_contain_colons() {
        let result = parse(r#"<vue-gwt:import class="com.example.Todo"/>"#);
        let import = element(&result.root_nodes[0]);
        assert_eq!(import.name, "vue-gwt:import");
        assert_eq!(import.attr("CLASS").unwrap().value, "com.example.Todo");
    }
}
