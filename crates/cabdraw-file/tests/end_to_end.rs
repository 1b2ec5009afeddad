//! 完整橱柜场景的导出测试

use cabdraw_core::prelude::*;
use cabdraw_file::{DxfExporter, ExportFormat, Exporter, PdfExporter};
use lopdf::Document;

/// 两块 3/4" 侧板加一块底板，外形 24 x 34.5 x 24
fn base_cabinet() -> SceneNode {
    let panel = RenderStyle::wood_panel().shared();
    SceneNode::new("base")
        .with_label("Base Cabinet")
        .with_child(
            SceneNode::new("left_side")
                .with_label("Left Side")
                .with_size(Vector3::new(0.75, 34.5, 24.0))
                .with_shared_style(panel.clone()),
        )
        .with_child(
            SceneNode::new("right_side")
                .with_label("Right Side")
                .with_position(Vector3::new(23.25, 0.0, 0.0))
                .with_size(Vector3::new(0.75, 34.5, 24.0))
                .with_shared_style(panel.clone()),
        )
        .with_child(
            SceneNode::new("bottom")
                .with_label("Bottom")
                .with_position(Vector3::new(0.75, 0.0, 0.0))
                .with_size(Vector3::new(22.5, 0.75, 24.0))
                .with_shared_style(panel),
        )
}

/// DXF 实体：类型、图层及其全部组码
#[derive(Debug)]
struct Entity {
    kind: String,
    layer: String,
    pairs: Vec<(i32, String)>,
}

fn dxf_pairs(text: &str) -> Vec<(i32, String)> {
    let lines: Vec<&str> = text.lines().collect();
    lines
        .chunks(2)
        .map(|c| (c[0].trim().parse().unwrap(), c[1].to_string()))
        .collect()
}

fn dxf_entities(text: &str) -> Vec<Entity> {
    let pairs = dxf_pairs(text);
    let start = pairs
        .iter()
        .position(|p| *p == (2, "ENTITIES".to_string()))
        .unwrap()
        + 1;

    let mut entities: Vec<Entity> = Vec::new();
    for (code, value) in &pairs[start..] {
        if *code == 0 {
            if value == "ENDSEC" {
                break;
            }
            entities.push(Entity {
                kind: value.clone(),
                layer: String::new(),
                pairs: Vec::new(),
            });
        } else if let Some(entity) = entities.last_mut() {
            if *code == 8 {
                entity.layer = value.clone();
            }
            entity.pairs.push((*code, value.clone()));
        }
    }
    entities
}

#[test]
fn dxf_three_panel_cabinet() {
    let settings = RenderSettings::cad_export();
    let bytes = DxfExporter::new()
        .export_view(&base_cabinet(), ViewDirection::Front, &settings)
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();

    // 段顺序
    let pairs = dxf_pairs(&text);
    let sections: Vec<&str> = pairs
        .windows(2)
        .filter(|w| w[0] == (0, "SECTION".to_string()) && w[1].0 == 2)
        .map(|w| w[1].1.as_str())
        .collect();
    assert_eq!(sections, vec!["HEADER", "TABLES", "ENTITIES"]);
    assert_eq!(pairs.last(), Some(&(0, "EOF".to_string())));
    assert_eq!(
        pairs.iter().filter(|p| p.0 == 0 && p.1 == "ENDSEC").count(),
        3
    );

    let entities = dxf_entities(&text);

    let polylines: Vec<&Entity> = entities
        .iter()
        .filter(|e| e.kind == "LWPOLYLINE")
        .collect();
    assert_eq!(polylines.len(), 3);
    for polyline in &polylines {
        assert_eq!(polyline.layer, "PARTS");
        assert!(polyline.pairs.contains(&(90, "4".to_string())));
        assert!(polyline.pairs.contains(&(70, "1".to_string())));
        assert_eq!(polyline.pairs.iter().filter(|p| p.0 == 10).count(), 4);
    }

    let dimension_lines = entities
        .iter()
        .filter(|e| e.kind == "LINE" && e.layer == "DIMENSIONS")
        .count();
    let dimension_texts: Vec<&Entity> = entities
        .iter()
        .filter(|e| e.kind == "TEXT" && e.layer == "DIMENSIONS")
        .collect();
    assert_eq!(dimension_lines, 2);
    assert_eq!(dimension_texts.len(), 2);
    assert!(dimension_texts[0].pairs.contains(&(1, "24\"".to_string())));
    assert!(dimension_texts[1].pairs.contains(&(1, "34 1/2\"".to_string())));

    // 3/4" 宽的侧板和 3/4" 高的底板都太小，不加标签
    assert!(!entities
        .iter()
        .any(|e| e.kind == "TEXT" && e.layer == "PARTS"));

    // 第三方读取器能解析
    let drawing = dxf::Drawing::load(&mut text.as_bytes()).unwrap();
    let vertex_counts: Vec<usize> = drawing
        .entities()
        .filter_map(|e| match &e.specific {
            dxf::entities::EntityType::LwPolyline(p) => Some(p.vertices.len()),
            _ => None,
        })
        .collect();
    assert_eq!(vertex_counts, vec![4, 4, 4]);
}

#[test]
fn dxf_without_dimensions_has_parts_only() {
    let settings = RenderSettings::cad_export().with_dimensions(false);
    let text = String::from_utf8(
        DxfExporter::new()
            .export_view(&base_cabinet(), ViewDirection::Front, &settings)
            .unwrap(),
    )
    .unwrap();
    let entities = dxf_entities(&text);
    assert_eq!(entities.len(), 3);
    assert!(entities.iter().all(|e| e.layer == "PARTS"));
}

fn page_content(doc: &Document, page_id: lopdf::ObjectId) -> String {
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

#[test]
fn pdf_blueprint_four_sheets() {
    let settings = RenderSettings::architectural_blueprint()
        .with_project_name("Kitchen")
        .with_company("Acme Cabinetry");
    let views = [
        ViewDirection::Front,
        ViewDirection::Left,
        ViewDirection::Top,
        ViewDirection::Isometric,
    ];
    let bytes = PdfExporter::new()
        .export_views(&base_cabinet(), &views, &settings)
        .unwrap();

    let doc = Document::load_mem(&bytes).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 4);

    // 非轴测页的宽高标注
    let expected_dimensions = [
        Some(("(24\")", "(34 1/2\")")),
        Some(("(24\")", "(34 1/2\")")),
        Some(("(24\")", "(24\")")),
        None,
    ];

    for (index, (number, page_id)) in pages.iter().enumerate() {
        let media_box: Vec<f32> = doc
            .get_dictionary(*page_id)
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_float().unwrap())
            .collect();
        assert_eq!(media_box, vec![0.0, 0.0, 792.0, 612.0]);

        let content = page_content(&doc, *page_id);
        let sheet = format!("({} OF 4)", number);
        assert!(content.contains(&sheet), "page {} lacks {}", number, sheet);
        assert!(content.contains("(Base Cabinet)"));
        assert!(content.contains("(Acme Cabinetry)"));
        assert!(content.contains(&format!("({} VIEW)", views[index].label())));

        match expected_dimensions[index] {
            Some((width, height)) => {
                assert!(content.contains(width), "page {} lacks width", number);
                assert!(content.contains(height), "page {} lacks height", number);
            }
            None => assert!(!content.contains("(34 1/2\")")),
        }
    }
}

#[test]
fn pdf_dynamic_mode_sizes_pages_to_content() {
    let settings = RenderSettings::blueprint();
    let bytes = PdfExporter::new()
        .export_views(
            &base_cabinet(),
            &[ViewDirection::Front, ViewDirection::Top],
            &settings,
        )
        .unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 2);

    let heights: Vec<f32> = pages
        .values()
        .map(|id| {
            doc.get_dictionary(*id)
                .unwrap()
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap()[3]
                .as_float()
                .unwrap()
        })
        .collect();
    // FRONT 高 34.5"，TOP 高 24"
    assert!(heights[0] > heights[1]);
}

#[test]
fn every_format_writes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let scene = base_cabinet();
    let settings = RenderSettings::default();

    for format in ExportFormat::ALL {
        let exporter = format.exporter();
        let path = dir
            .path()
            .join(format!("cabinet.{}", exporter.file_extension()));
        exporter
            .export_views_to_file(&scene, &[ViewDirection::Front], &settings, &path)
            .unwrap();
        let written = std::fs::read(&path).unwrap();
        assert!(!written.is_empty(), "{} wrote nothing", exporter.format_name());
        assert_eq!(ExportFormat::from_path(&path), Some(format));
    }

    let pdf = Document::load(dir.path().join("cabinet.pdf")).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
}

#[test]
fn settings_round_trip_through_json() {
    let settings = RenderSettings::architectural_blueprint().with_drawn_by("J. Doe");
    let json = settings.to_json().unwrap();
    let restored = RenderSettings::from_json(&json).unwrap();
    assert_eq!(restored, settings);

    let bytes = PdfExporter::new()
        .export_view(&base_cabinet(), ViewDirection::Front, &restored)
        .unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
    assert!(page_content(&doc, page_id).contains("(J. Doe)"));
}
