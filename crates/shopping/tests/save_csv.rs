use mealweek_shared::ShoppingListEntry;
use mealweek_shopping::{ExportNaming, save_csv};
use temp_dir::TempDir;

#[test]
fn test_save_csv_writes_item_and_meals() {
    let dir = TempDir::new().unwrap();
    let entries = vec![
        ShoppingListEntry::new(
            "Chicken breast",
            vec![
                "Monday: Grilled Chicken".to_owned(),
                "Thursday: Chicken Stir-Fry".to_owned(),
            ],
        ),
        ShoppingListEntry::new("Salt", vec!["General ingredient".to_owned()]),
    ];

    let path = save_csv(dir.path(), "shopping_list_test.csv", &entries).unwrap();

    assert_eq!(path, dir.path().join("shopping_list_test.csv"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Item,Meals\n\
         Chicken breast,\"Monday: Grilled Chicken, Thursday: Chicken Stir-Fry\"\n\
         Salt,General ingredient\n"
    );
}

#[test]
fn test_save_csv_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    assert!(save_csv(&missing, "list.csv", &[]).is_err());
}

#[test]
fn test_generated_filename_can_be_saved() {
    let dir = TempDir::new().unwrap();
    let filename = ExportNaming::default()
        .filename(mealweek_shopping::now())
        .unwrap();

    assert!(filename.starts_with("shopping_list_"));
    assert!(filename.ends_with(".csv"));
    // shopping_list_YYYYMMDD_HHMMSS.csv
    assert_eq!(filename.len(), "shopping_list_".len() + 15 + ".csv".len());

    save_csv(dir.path(), &filename, &[]).unwrap();
    assert!(dir.path().join(&filename).exists());
}
