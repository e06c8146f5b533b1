use percept::geom::radius;
use percept::{
    Attribute, Brand, Lang, MapTransform, PerceptConfig, PositioningOptions, Project, Viewport,
    position,
};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn basic_project() -> Project {
    let path = workspace_root().join("fixtures/project/basic.json");
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    Project::from_json_str(&text).expect("fixture parses")
}

#[test]
fn fixture_resolves_ideal_and_fills_tables() {
    let result = position(&basic_project(), &PositioningOptions::default()).expect("position");

    assert_eq!(result.ideal_index, Some(3));
    assert_eq!(result.brand_coords.len(), 4);
    assert_eq!(result.attr_coords.len(), 3);

    let t = &result.tables;
    assert_eq!(t.performance_means.len(), 4);
    assert_eq!(t.performance_means[0].values, vec![4.5, 2.0, 1.5]);
    let distance_brands: Vec<&str> = t
        .distances_to_ideal
        .iter()
        .map(|d| d.brand.as_str())
        .collect();
    assert_eq!(distance_brands, ["Acme", "Zenith", "Nova"]);

    // The project asks for Spanish labels.
    let labels: Vec<&str> = t
        .attribute_sensitivity
        .iter()
        .map(|a| a.attribute.as_str())
        .collect();
    assert_eq!(labels, ["Precio", "Calidad", "Diseño"]);
    for (row, p) in t.attribute_sensitivity.iter().zip(&result.attr_coords) {
        assert_eq!(row.loading_x, p.x);
        assert_eq!(row.loading_y, p.y);
        assert!((row.magnitude - radius(*p)).abs() < 1e-12);
    }

    let prefs: Vec<f64> = t.preference_means.iter().map(|p| p.value).collect();
    assert_eq!(prefs, vec![2.5, 4.5, 3.5, 4.0]);
}

#[test]
fn brands_and_attributes_share_the_unit_disc() {
    let result = position(&basic_project(), &PositioningOptions::default()).expect("position");
    let max = result
        .brand_coords
        .iter()
        .chain(&result.attr_coords)
        .map(|p| radius(*p))
        .fold(0.0_f64, f64::max);
    assert!((max - 1.0).abs() < 1e-6, "max radius {max}");
    assert!(result.max_radius > 1e-6);
}

#[test]
fn repeated_runs_are_identical() {
    let project = basic_project();
    let opts = PositioningOptions::default();
    let a = position(&project, &opts).expect("first");
    let b = position(&project, &opts).expect("second");
    assert_eq!(a, b);
}

#[test]
fn explicit_benchmark_and_language_override_the_project() {
    let opts = PositioningOptions {
        lang: Some(Lang::En),
        ..Default::default()
    }
    .with_benchmark("zenith");
    let result = position(&basic_project(), &opts).expect("position");
    assert_eq!(result.ideal_index, Some(1));
    assert_eq!(result.tables.distances_to_ideal.len(), 3);
    assert_eq!(result.tables.attribute_sensitivity[0].attribute, "Price");
}

#[test]
fn config_benchmark_applies_when_project_names_none() {
    let mut project = basic_project();
    project.brands[3] = Brand::new("Reference");
    for r in &mut project.responses {
        if let Some(v) = r.performance.shift_remove("IDEAL") {
            r.performance.insert("Reference".to_string(), v);
        }
        if let Some(v) = r.preference.shift_remove("IDEAL") {
            r.preference.insert("Reference".to_string(), v);
        }
    }

    let none = position(&project, &PositioningOptions::default()).expect("position");
    assert_eq!(none.ideal_index, None);
    assert!(none.tables.distances_to_ideal.is_empty());

    let cfg = PerceptConfig::from_yaml_str("benchmark: reference\n").expect("yaml");
    let with_cfg = position(&project, &PositioningOptions::from_config(&cfg)).expect("position");
    assert_eq!(with_cfg.ideal_index, Some(3));
}

#[test]
fn missing_brands_or_attributes_give_an_empty_result() {
    let project = Project {
        brands: vec![Brand::new("IDEAL")],
        attributes: Vec::<Attribute>::new(),
        ..Default::default()
    };
    let result = position(&project, &PositioningOptions::default()).expect("position");
    assert!(result.is_empty());
    assert_eq!(result.ideal_index, None);

    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["idealIndex"], serde_json::Value::Null);
    assert_eq!(json["brandCoords"], serde_json::json!([]));
    assert_eq!(json["tables"]["distancesToIdeal"], serde_json::json!([]));
}

#[test]
fn json_output_uses_pairs_and_camel_case() {
    let result = position(&basic_project(), &PositioningOptions::default()).expect("position");
    let json = serde_json::to_value(&result).expect("serialize");
    let first = json["brandCoords"][0].as_array().expect("pair");
    assert_eq!(first.len(), 2);
    assert_eq!(json["idealIndex"], 3);
    assert!(json["tables"]["attributeSensitivity"][0]["loadingX"].is_number());
    assert!(json.get("performance").is_none());
}

#[test]
fn hovering_a_drawn_brand_finds_it() {
    let result = position(&basic_project(), &PositioningOptions::default()).expect("position");
    let transform = MapTransform::for_viewport(&Viewport::new(800.0, 600.0, 1.0));
    let last = result.brand_coords.len() - 1;
    let pointer = transform.to_screen(result.brand_coords[last]);
    assert_eq!(result.hit_brand(&transform, pointer, 7.0), Some(last));

    let far = transform.to_screen(percept::geom::point(3.0, 3.0));
    assert_eq!(result.hit_brand(&transform, far, 7.0), None);
}

#[test]
fn direct_map_reads_the_aggregated_means() {
    let result = position(&basic_project(), &PositioningOptions::default()).expect("position");
    let map = result.direct_map("price", "quality").expect("known attributes");
    assert_eq!(map.points.len(), 4);
    let ideal = map.ideal().expect("IDEAL is in range");
    assert_eq!((ideal.x, ideal.y), (0.875, 1.0));
    assert!(
        map.points
            .iter()
            .filter(|p| !p.is_ideal)
            .all(|p| p.distance_to_ideal.is_some())
    );

    assert!(result.direct_map("price", "speed").is_err());
}

#[test]
fn json_config_file_changes_projection_and_language() {
    let path = workspace_root().join("fixtures/config/no_stretch.json");
    let text = std::fs::read_to_string(&path).expect("read config");
    let cfg = PerceptConfig::from_json_str(&text).expect("valid json");
    let opts = PositioningOptions::from_config(&cfg);
    assert_eq!(opts.layout.projector.stretch, 1.0);
    assert_eq!(opts.layout.projector.beta_ideal, 0.0);

    let project = basic_project();
    let tuned = position(&project, &opts).expect("position");
    let default = position(&project, &PositioningOptions::default()).expect("position");
    assert_eq!(tuned.tables.attribute_sensitivity[0].attribute, "Price");
    // Brand geometry does not depend on projector settings before normalization.
    assert_eq!(tuned.eigenvalues, default.eigenvalues);
    assert_ne!(tuned.attr_coords, default.attr_coords);
}
