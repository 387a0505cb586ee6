use super::*;
use crate::composition::model::LayerKind;

#[test]
fn builtin_covers_every_category() {
    let cat = TemplateCatalog::builtin().unwrap();
    assert_eq!(cat.len(), 12);
    for c in Category::ALL {
        assert!(cat.by_category(c).count() >= 2, "category {c} has too few templates");
    }
}

#[test]
fn builtin_countdowns_carry_countdown_layer() {
    let cat = TemplateCatalog::builtin().unwrap();
    for tpl in cat.by_category(Category::Countdowns) {
        assert!(
            tpl.layers
                .iter()
                .any(|l| l.name == COUNTDOWN_LAYER_NAME && matches!(l.kind, LayerKind::Text(_))),
            "{} has no countdown text layer",
            tpl.id
        );
    }
}

#[test]
fn require_unknown_id_is_validation_error() {
    let cat = TemplateCatalog::builtin().unwrap();
    assert!(cat.require("countdown-ring").is_ok());
    assert!(matches!(
        cat.require("nope"),
        Err(KineoError::Validation(_))
    ));
}

#[test]
fn json_catalog_accepts_list_and_wrapped_forms() {
    let tpl = r##"{
        "id": "custom",
        "name": "Custom",
        "category": "intros",
        "duration_secs": 2.0,
        "layers": [
            { "name": "T", "kind": "text", "content": "hi", "size": 20, "color": "#ffffff" }
        ]
    }"##;
    let list = TemplateCatalog::from_json_str(&format!("[{tpl}]")).unwrap();
    assert_eq!(list.len(), 1);
    let wrapped = TemplateCatalog::from_json_str(&format!("{{\"templates\": [{tpl}]}}")).unwrap();
    assert_eq!(wrapped.get("custom").unwrap().layers.len(), 1);
}

#[test]
fn merge_rejects_duplicate_ids() {
    let base = TemplateCatalog::builtin().unwrap();
    let extra = TemplateCatalog::from_templates([base.require("bumper-follow").unwrap().clone()])
        .unwrap();
    assert!(base.clone().merge(extra).is_err());

    let mut renamed = base.require("bumper-follow").unwrap().clone();
    renamed.id = "bumper-follow-2".to_owned();
    let merged = base
        .merge(TemplateCatalog::from_templates([renamed]).unwrap())
        .unwrap();
    assert_eq!(merged.len(), 13);
}

#[test]
fn bad_json_is_serde_error() {
    assert!(matches!(
        TemplateCatalog::from_json_str("{"),
        Err(KineoError::Serde(_))
    ));
}
