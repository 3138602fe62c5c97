use std::fs;
use veritree::core::Project;
use veritree::formatters::{JsonFormatter, TreeFormatter};

async fn cyclic_project() -> (tempfile::TempDir, Project) {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("top.v"), "module top;\n  ping p0(.a(a));\nendmodule\n").unwrap();
    fs::write(root.join("ping.v"), "module ping(a);\n  pong q0(.a(a));\nendmodule\n").unwrap();
    fs::write(root.join("pong.v"), "module pong(a);\n  ping p1(.a(a));\nendmodule\n").unwrap();
    fs::write(root.join("defs.vh"), "").unwrap();
    fs::write(root.join("notes.md"), "").unwrap();
    fs::write(root.join("inc.v"), "`include \"defs.vh\"\n").unwrap();

    let mut project = Project::new(root);
    project.wait_for_accomplish().await.unwrap();
    (dir, project)
}

#[tokio::test]
async fn tree_shows_instances_and_cuts_cycles() {
    let (_dir, project) = cyclic_project().await;
    let text = TreeFormatter::new().format_project(&project);
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "`includes/",
            "  defs.vh",
            "top (top.v)",
            "  p0  -  ping (ping.v)",
            "    q0  -  pong (pong.v)",
            "      p1  -  ping (ping.v) [recursive]",
            "Documents/",
            "  notes.md",
        ]
    );
}

#[tokio::test]
async fn json_lists_modules_by_id() {
    let (_dir, project) = cyclic_project().await;
    let text = JsonFormatter::new().format_project(&project).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["state"], "Done");
    let modules = value["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 3);
    let by_name = |name: &str| modules.iter().find(|m| m["name"] == name).unwrap();
    let (top, ping, pong) = (by_name("top"), by_name("ping"), by_name("pong"));

    assert_eq!(value["roots"], serde_json::Value::Array(vec![top["id"].clone()]));
    assert_eq!(top["file"], "top.v");
    assert_eq!(top["children"][0]["instance"], "p0");
    assert_eq!(top["children"][0]["module"], ping["id"]);
    assert_eq!(ping["children"][0]["module"], pong["id"]);
    assert_eq!(pong["children"][0]["module"], ping["id"]);
    assert_eq!(value["includes"][0]["name"], "defs.vh");
    assert_eq!(value["buckets"][1]["name"], "Documents");
}

/// `s0` instantiates `s1` twice, `s1` instantiates `s2` twice, and so on.
async fn diamond_chain(stages: usize) -> (tempfile::TempDir, Project) {
    let dir = tempfile::TempDir::new().unwrap();
    for i in 0..stages {
        let body = if i + 1 < stages {
            format!("  s{n} u0(.a(a));\n  s{n} u1(.a(a));\n", n = i + 1)
        } else {
            String::new()
        };
        fs::write(
            dir.path().join(format!("s{i}.v")),
            format!("module s{i}(a);\n{body}endmodule\n"),
        )
        .unwrap();
    }

    let mut project = Project::new(dir.path());
    project.wait_for_accomplish().await.unwrap();
    (dir, project)
}

#[tokio::test]
async fn shared_submodules_are_expanded_once() {
    let (_dir, project) = diamond_chain(20).await;
    assert_eq!(project.root_modules().len(), 1);

    let text = TreeFormatter::new().format_project(&project);
    let lines: Vec<_> = text.lines().collect();
    // root, then per stage one expanded and one repeated instance
    assert_eq!(lines.len(), 1 + 2 * 19);
    assert_eq!(lines[0], "s0 (s0.v)");
    assert_eq!(lines[1], "  u0  -  s1 (s1.v)");
    assert_eq!(lines[2], "    u0  -  s2 (s2.v)");
    assert_eq!(lines[38], "  u1  -  s1 (s1.v) [shown above]");
    assert_eq!(text.matches("[shown above]").count(), 18);
    assert!(!text.contains("[recursive]"));

    let value = JsonFormatter::new().to_value(&project);
    let modules = value["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 20);
    assert!(modules
        .iter()
        .all(|m| m["children"].as_array().unwrap().len() <= 2));
}

#[tokio::test]
async fn formatters_write_to_file() {
    let (dir, project) = cyclic_project().await;
    let tree_path = dir.path().join("tree.txt");
    let json_path = dir.path().join("tree.json");

    TreeFormatter::new().format_to_file(&project, &tree_path).unwrap();
    assert_eq!(
        fs::read_to_string(&tree_path).unwrap(),
        TreeFormatter::new().format_project(&project)
    );

    JsonFormatter::new()
        .compact()
        .format_to_file(&project, &json_path)
        .unwrap();
    let text = fs::read_to_string(&json_path).unwrap();
    assert_eq!(text.lines().count(), 1);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, JsonFormatter::new().to_value(&project));
}

#[test]
fn empty_project_reports_nothing_found() {
    let dir = tempfile::TempDir::new().unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut project = Project::new(dir.path());
    runtime.block_on(project.wait_for_accomplish()).unwrap();

    let text = TreeFormatter::new().format_project(&project);
    assert_eq!(text, "No verilog project in this directory\n");
}
