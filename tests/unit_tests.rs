mod common;

use pvo::prelude::*;
use pvo::storage::MemoryStore;
use pvo::store::DisplaySettings;
use pvo::store::history::{HISTORY_KEY, MAX_HISTORY_ITEMS};
use pvo::types::ListParamsBuilder;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;
    use common::*;

    #[test]
    fn test_comic_keeps_unknown_fields() {
        let comic: Comic = serde_json::from_value(json!({
            "id": "c-9",
            "name": "Tidepool",
            "add_date": "2024-07-01T00:00:00Z",
            "is_r18": false,
            "page_count": 48,
            "tags": ["slice of life"],
            "read_frequency": 12
        }))
        .unwrap();

        assert_eq!(comic.id, ItemId::from("c-9"));
        assert_eq!(comic.page_count, Some(48));
        assert_eq!(comic.extra["read_frequency"], json!(12));

        let back = serde_json::to_value(&comic).unwrap();
        assert_eq!(back["tags"], json!(["slice of life"]));
        assert_eq!(back["id"], json!("c-9"));
    }

    #[test]
    fn test_image_set_and_tag_models() {
        let set: ImageSet = serde_json::from_value(json!({
            "id": 3,
            "name": "Harbour",
            "image_count": 20
        }))
        .unwrap();
        assert_eq!(set.add_date, "");
        assert!(!set.is_r18);
        assert_eq!(set.image_count, Some(20));

        let tag: CategoryTag =
            serde_json::from_value(json!({"type": "author", "name": "Ito", "is_r18": true}))
                .unwrap();
        assert_eq!(tag.tag_type, "author");
        assert!(tag.is_r18);
        assert_eq!(serde_json::to_value(&tag).unwrap()["type"], json!("author"));
    }

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId::from(42).to_string(), "42");
        assert_eq!(ItemId::from("abc").to_string(), "abc");
        assert!(ItemId::from("  ").is_blank());
        assert!(!ItemId::from(0).is_blank());
    }

    #[test]
    fn test_list_params_builder() {
        let params = ListParamsBuilder::default()
            .param("tag", "action")
            .param("tag", "drama")
            .build()
            .unwrap();

        assert_eq!(params.pairs().len(), 2);
        assert_eq!(params.pairs()[1], ("tag".to_string(), "drama".to_string()));
        assert!(ListParams::new().is_empty());

        let collected: ListParams = vec![("search", "sea")].into_iter().collect();
        assert_eq!(collected, ListParams::new().with("search", "sea"));
    }

    #[test]
    fn test_sort_commands() {
        assert_eq!(SortOrder::from_command("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::from_command("desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::from_command("name"), None);

        assert_eq!(SortField::from_command("name"), SortField::Name);
        assert_eq!(SortField::from_command("add_date"), SortField::AddDate);
        assert_eq!(SortField::from_command("whatever"), SortField::AddDate);

        assert_eq!(serde_json::to_value(SortField::AddDate).unwrap(), json!("add_date"));
        assert_eq!(serde_json::to_value(SortOrder::Desc).unwrap(), json!("desc"));
    }

    #[test]
    fn test_without_r18() {
        let comics = sample_comics();

        let hidden = comics.clone().without_r18(false);
        assert_eq!(hidden.len(), 3);
        assert!(hidden.iter().all(|c| !c.is_r18));

        let shown = comics.clone().without_r18(true);
        assert_eq!(shown, comics);
    }

    #[test]
    fn test_sorted_by_name_and_date() {
        let by_name = sample_comics().sorted_by(SortSettings {
            field: SortField::Name,
            order: SortOrder::Asc,
        });
        let names: Vec<_> = by_name.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Afterglow", "Birdsong", "Cherry", "Drift", "Moonlight"]);

        let newest_first = sample_comics().sorted_by(SortSettings {
            field: SortField::AddDate,
            order: SortOrder::Desc,
        });
        let ids: Vec<_> = newest_first.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, ["3", "5", "1", "4", "2"]);
    }

    #[test]
    fn test_desc_is_reversed_asc() {
        let mut items = sample_comics();
        items.push(comic(6, "Cherry", "2023-12-31T00:00:00Z", false));

        for field in [SortField::Name, SortField::AddDate] {
            let mut asc = items.clone().sorted_by(SortSettings {
                field,
                order: SortOrder::Asc,
            });
            let desc = items.clone().sorted_by(SortSettings {
                field,
                order: SortOrder::Desc,
            });

            asc.reverse();
            assert_eq!(asc, desc);
        }
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let items = vec![
            comic(1, "Same", "2024-01-01", false),
            comic(2, "Same", "2024-01-01", false),
            comic(3, "Other", "2024-01-01", false),
        ];

        let sorted = items.sorted_by(SortSettings::default());
        let ids: Vec<_> = sorted.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn test_r18_store_persists() {
        let storage = Storage::memory();

        let store = R18ModeStore::new(storage.clone());
        assert!(!store.is_r18());
        store.change_r18_mode(true);

        assert!(R18ModeStore::new(storage.clone()).is_r18());
        assert_eq!(
            storage.load::<serde_json::Value>("pvo-r18-mode"),
            Some(json!({"is_r18": true}))
        );

        let ephemeral = R18ModeStore::ephemeral();
        ephemeral.change_r18_mode(true);
        assert!(ephemeral.is_r18());
    }

    #[test]
    fn test_settings_defaults_and_setters() {
        let storage = Storage::memory();
        let settings = SettingsStore::new(storage.clone());

        assert_eq!(settings.snapshot(), DisplaySettings::default());
        assert!(settings.show_recently_added());
        assert!(settings.show_browsing_history());
        assert_eq!(settings.homepage_section_item_count(), 10);
        assert_eq!(settings.carousel_item_count(), 5);

        settings.set_show_recently_added(false);
        settings.set_show_browsing_history(false);
        settings.set_homepage_section_item_count(6);
        settings.set_carousel_item_count(3);

        let reloaded = SettingsStore::new(storage).snapshot();
        assert_eq!(
            reloaded,
            DisplaySettings {
                show_recently_added: false,
                show_browsing_history: false,
                homepage_section_item_count: 6,
                carousel_item_count: 3,
            }
        );
    }

    #[test]
    fn test_settings_partial_record_fills_defaults() {
        let storage = Storage::memory();
        storage.save("pvo-settings", &json!({"carousel_item_count": 8}));

        let settings = SettingsStore::new(storage);
        assert_eq!(settings.carousel_item_count(), 8);
        assert_eq!(settings.homepage_section_item_count(), 10);
        assert!(settings.show_recently_added());
    }

    #[test]
    fn test_ui_toggle() {
        let ui = UiStore::default();
        assert!(ui.is_side_menu_visible());

        ui.toggle_side_menu(None);
        assert!(!ui.is_side_menu_visible());
        ui.toggle_side_menu(None);
        assert!(ui.is_side_menu_visible());

        ui.toggle_side_menu(Some(false));
        ui.toggle_side_menu(Some(false));
        assert!(!ui.is_side_menu_visible());
    }

    #[test]
    fn test_ui_store_persists_only_with_storage() {
        let storage = Storage::memory();

        UiStore::new(Some(storage.clone())).toggle_side_menu(Some(false));
        assert!(!UiStore::new(Some(storage.clone())).is_side_menu_visible());

        UiStore::new(None).toggle_side_menu(Some(false));
        assert!(UiStore::new(None).is_side_menu_visible());
    }

    #[test]
    fn test_history_caps_at_max() {
        let history = HistoryStore::new(Storage::memory());

        for id in 1..=21 {
            history.add_item(HistoryItem::new(id, "comic"));
        }

        assert_eq!(history.len(), MAX_HISTORY_ITEMS);
        let all = history.get_history(100);
        assert_eq!(all.first().unwrap().id, Some(ItemId::from(21)));
        assert_eq!(all.last().unwrap().id, Some(ItemId::from(2)));
    }

    #[test]
    fn test_history_moves_existing_to_front() {
        let history = HistoryStore::new(Storage::memory());
        history.add_item(HistoryItem::new(1, "comic"));
        history.add_item(HistoryItem::new(2, "comic"));
        history.add_item(HistoryItem::new(1, "imageset"));
        history.add_item(HistoryItem::new(1, "comic").with_meta("name", "Moonlight"));

        let items = history.recent();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, Some(ItemId::from(1)));
        assert_eq!(items[0].item_type.as_deref(), Some("comic"));
        assert_eq!(items[0].meta["name"], json!("Moonlight"));
        assert_eq!(items[1].item_type.as_deref(), Some("imageset"));
        assert_eq!(items[2].id, Some(ItemId::from(2)));
    }

    #[test]
    fn test_history_rejects_incomplete_items() {
        let history = HistoryStore::new(Storage::memory());

        let mut missing_type = HistoryItem::new(1, "comic");
        missing_type.item_type = None;
        history.add_item(missing_type);

        let mut missing_id = HistoryItem::new(1, "comic");
        missing_id.id = None;
        history.add_item(missing_id);

        history.add_item(HistoryItem::new("", "comic"));
        history.add_item(HistoryItem::new(1, ""));

        assert!(history.is_empty());
    }

    #[test]
    fn test_history_limit_persistence_and_clear() {
        let storage = Storage::memory();
        let history = HistoryStore::new(storage.clone());
        for id in 1..=12 {
            history.add_item(HistoryItem::new(id, "imageset"));
        }

        assert_eq!(history.recent().len(), 10);
        assert_eq!(history.get_history(3).len(), 3);
        assert_eq!(history.get_history(0).len(), 0);

        let reloaded = HistoryStore::new(storage.clone());
        assert_eq!(reloaded.get_history(100), history.get_history(100));

        reloaded.clear();
        assert!(reloaded.is_empty());
        assert_eq!(storage.load::<serde_json::Value>(HISTORY_KEY), None);
    }

    #[test]
    fn test_history_repairs_stored_list() {
        let storage = Storage::memory();
        let mut stored: Vec<serde_json::Value> = (1..=24)
            .map(|id| json!({"id": id, "type": "comic", "name": format!("#{id}")}))
            .collect();
        stored.insert(1, json!({"id": 1, "type": "comic", "name": "older copy"}));
        stored.insert(2, json!({"type": "comic"}));
        storage.save(HISTORY_KEY, &stored);

        let history = HistoryStore::new(storage);
        let items = history.get_history(100);

        assert_eq!(items.len(), MAX_HISTORY_ITEMS);
        assert_eq!(items[0].meta["name"], json!("#1"));
        assert_eq!(items[1].id, Some(ItemId::from(2)));
        assert_eq!(items.last().unwrap().id, Some(ItemId::from(20)));

        let mut keys: Vec<_> = items.iter().map(|i| i.id.clone()).collect();
        keys.dedup();
        assert_eq!(keys.len(), MAX_HISTORY_ITEMS);
    }

    #[test]
    fn test_history_from_item() {
        let item = HistoryItem::from_item(
            ResourceKind::ImageSet,
            &image_set(8, "Harbour", "2024-02-02", true),
        );

        assert_eq!(item.item_type.as_deref(), Some("imageset"));
        assert_eq!(item.meta["name"], json!("Harbour"));
        assert_eq!(item.meta["is_r18"], json!(true));

        let stored = serde_json::to_value(&item).unwrap();
        assert_eq!(stored["type"], json!("imageset"));
        assert_eq!(stored["id"], json!(8));
    }

    #[test]
    fn test_failing_storage_is_absorbed() {
        let storage = Storage::new(FailingStore);

        let r18 = R18ModeStore::new(storage.clone());
        r18.change_r18_mode(true);
        assert!(r18.is_r18());

        let history = HistoryStore::new(storage.clone());
        history.add_item(HistoryItem::new(1, "comic"));
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());

        assert_eq!(SettingsStore::new(storage).snapshot(), DisplaySettings::default());
    }

    #[test]
    fn test_stores_share_one_backend() {
        let storage = Storage::new(MemoryStore::new());

        R18ModeStore::new(storage.clone()).change_r18_mode(true);
        SettingsStore::new(storage.clone()).set_carousel_item_count(2);
        HistoryStore::new(storage.clone()).add_item(HistoryItem::new(5, "comic"));

        assert!(R18ModeStore::new(storage.clone()).is_r18());
        assert_eq!(SettingsStore::new(storage.clone()).carousel_item_count(), 2);
        assert_eq!(HistoryStore::new(storage).len(), 1);
    }

    #[test]
    fn test_breadcrumb_from_json_menu() {
        let menu: Vec<MenuNode> = serde_json::from_value(json!([
            {"name": "首页", "path": "/"},
            {"name": "资源", "children": [
                {"name": "漫画", "path": "/comics", "children": [
                    {"name": "上传", "path": "/comics/upload"}
                ]},
                {"name": "图集", "path": "/imagesets"}
            ]}
        ]))
        .unwrap();

        let trail = find_breadcrumb(&menu, "/comics/upload").unwrap();
        let names: Vec<_> = trail.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["资源", "漫画", "上传"]);

        let trail = find_breadcrumb(&menu, "/imagesets").unwrap();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[1].path.as_deref(), Some("/imagesets"));

        assert!(find_breadcrumb(&menu, "/settings").is_none());
    }
}
