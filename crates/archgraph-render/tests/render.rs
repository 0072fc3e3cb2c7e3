use std::collections::HashMap;

use archgraph_core::{DiagramInput, DiagramOptions, ImportFact, build_diagram, legend_for};
use archgraph_render::{render_all, render_arrow_text, render_boxes};
use pretty_assertions::assert_eq;

fn web_service(reverse: bool) -> DiagramInput {
    let mut files = vec![
        ("src/api/routes.js", "router.get(\"/users\", list)"),
        ("src/db/pool.js", "const pool = mysql.createPool(process.env.DB_URL)"),
    ];
    let mut counts = vec![("express", 3usize), ("mysql2", 1)];
    if reverse {
        files.reverse();
        counts.reverse();
    }
    DiagramInput {
        rel_paths: files.iter().map(|(p, _)| p.to_string()).collect(),
        file_contents: files
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect::<HashMap<_, _>>(),
        imports: vec![
            ImportFact::internal("src/api/routes.js", "../db/pool", Some("src/db/pool.js")),
            ImportFact::external("src/api/routes.js", "express"),
            ImportFact::external("src/db/pool.js", "mysql2/promise"),
        ],
        external_dependency_counts: counts
            .iter()
            .map(|(n, c)| (n.to_string(), *c))
            .collect(),
    }
}

#[test]
fn arrow_text_for_small_service() {
    let diagram = build_diagram(&web_service(false), &DiagramOptions::default());
    let expected = format!(
        "{}\n{}",
        legend_for(diagram.granularity),
        "\
(GET /users) --> [src/api]
[src/api] --> [ext:express]
[src/api] --> [src/db]
[src/db] ..> [db:mysql] <<reads/writes>>
[src/db] ..> [env] <<uses>>
[src/db] --> [ext:mysql2]
"
    );
    assert_eq!(render_arrow_text(&diagram), expected);
}

#[test]
fn boxes_for_small_service() {
    let diagram = build_diagram(&web_service(false), &DiagramOptions::default());
    let rendered = render_boxes(&diagram);

    assert!(rendered.starts_with("@startuml\n"));
    assert!(rendered.ends_with("endlegend\n@enduml\n"));
    assert!(rendered.contains("database \"db:mysql\" as datasource_db_mysql\n"));
    assert!(rendered.contains("queue \"env\" as datasource_env\n"));
    assert!(rendered.contains("usecase \"(GET /users)\" as endpoint_GET__users\n"));
    assert!(rendered.contains("component \"ext:mysql2\" as external_ext_mysql2\n"));
    assert!(rendered.contains("module_src_db ..> datasource_db_mysql : reads/writes\n"));
    assert!(rendered.contains("endpoint_GET__users --> module_src_api\n"));
}

#[test]
fn output_is_byte_identical_across_input_orders() {
    let options = DiagramOptions::default();
    let a = render_all(&build_diagram(&web_service(false), &options));
    let b = render_all(&build_diagram(&web_service(true), &options));
    assert_eq!(a, b);
}

#[test]
fn empty_input_renders_legend_only() {
    let diagram = build_diagram(&DiagramInput::default(), &DiagramOptions::default());
    assert!(diagram.nodes.is_empty());
    assert!(diagram.edges.is_empty());

    let text = render_arrow_text(&diagram);
    assert_eq!(text, format!("{}\n", diagram.legend));

    let boxes = render_boxes(&diagram);
    assert!(boxes.contains(&diagram.legend));
    assert!(!diagram.legend.is_empty());
}
