mod common;

use comic_vault::entity::{collection, comic, comic_collection, comic_creator, creator};
use comic_vault::error::AppError;
use comic_vault::models::{CollectionSearch, CreateCollection};
use comic_vault::repositories::{CollectionRepository, CreatorRepository, Repository};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use common::{Factory, TestApp};

const STAN_LEE: (Option<&str>, &str) = (
    Some("http://gateway.marvel.com/v1/public/creators/30"),
    "Stan Lee",
);
const STEVE_DITKO: (Option<&str>, &str) = (
    Some("http://gateway.marvel.com/v1/public/creators/32"),
    "Steve Ditko",
);

fn search(name: &str, limit: u64, page: u64) -> CollectionSearch {
    CollectionSearch {
        name: name.to_string(),
        limit,
        page,
    }
}

#[tokio::test]
async fn test_create_and_find_collection() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let created = factory.create_collection(7, "Silver Age").await;
    assert_eq!(created.user_id, 7);
    assert_eq!(created.name, "Silver Age");
    assert!(created.comics.is_empty());

    let found = CollectionRepository::find_by_id(app.db(), created.id)
        .await
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Silver Age");
}

#[tokio::test]
async fn test_find_missing_collection_is_not_found() {
    let app = TestApp::new().await;

    let err = CollectionRepository::find_by_id(app.db(), 999)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_duplicate_names_are_allowed() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let first = factory.create_collection(1, "Favorites").await;
    let second = factory.create_collection(1, "Favorites").await;

    assert_ne!(first.id, second.id);
    assert_eq!(CollectionRepository::count(app.db()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_create_collection_for_unknown_user_is_not_found() {
    let app = TestApp::new().await;

    let input = CreateCollection {
        name: "Orphan".to_string(),
    };
    let err = CollectionRepository::create(app.db(), 404, &input)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(CollectionRepository::count(app.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_comic_twice_is_idempotent() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection(1, "Spidey").await;
    let record = factory.catalog_comic(1158, &[STAN_LEE, STEVE_DITKO]);

    factory.add_comic(collection.id, &record).await;
    CollectionRepository::add_comic(app.db(), collection.id, &record)
        .await
        .expect("second add must not fail");

    assert_eq!(comic::Entity::find().count(app.db()).await.unwrap(), 1);
    assert_eq!(
        comic_collection::Entity::find().count(app.db()).await.unwrap(),
        1
    );
    assert_eq!(creator::Entity::find().count(app.db()).await.unwrap(), 2);
    assert_eq!(
        comic_creator::Entity::find().count(app.db()).await.unwrap(),
        2
    );

    let found = CollectionRepository::find_by_id(app.db(), collection.id)
        .await
        .unwrap();
    assert_eq!(found.comics.len(), 1);
    assert_eq!(found.comics[0].id, 1158);
    assert_eq!(
        found.comics[0].thumbnail_url,
        "http://i.annihil.us/u/prod/marvel/i/mg/test/1158.jpg"
    );
}

#[tokio::test]
async fn test_add_comic_stores_parsed_creators() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection(1, "Credits").await;
    let record = factory.catalog_comic(
        10,
        &[
            STAN_LEE,
            (
                Some("http://gateway.marvel.com/v1/public/creators/99"),
                "Moebius",
            ),
        ],
    );

    factory.add_comic(collection.id, &record).await;

    let creators = CreatorRepository::creators_of_comic(app.db(), 10)
        .await
        .unwrap();
    assert_eq!(creators.len(), 2);

    assert_eq!(creators[0].id, 30);
    assert_eq!(creators[0].first_name, "Stan");
    assert_eq!(creators[0].last_name, "Lee");
    assert_eq!(creators[0].thumbnail_url, "");

    // No space in the name: both parts fall back to empty
    assert_eq!(creators[1].id, 99);
    assert_eq!(creators[1].first_name, "");
    assert_eq!(creators[1].last_name, "");
}

#[tokio::test]
async fn test_add_comic_skips_unparsable_creator() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection(1, "Odd credits").await;
    let record = factory.catalog_comic(
        20,
        &[
            (
                Some("http://gateway.marvel.com/v1/public/creators/"),
                "Nobody Special",
            ),
            (None, "Uncredited Artist"),
            STEVE_DITKO,
        ],
    );

    CollectionRepository::add_comic(app.db(), collection.id, &record)
        .await
        .expect("a bad creator must not abort the whole operation");

    assert_eq!(comic::Entity::find().count(app.db()).await.unwrap(), 1);
    assert_eq!(
        comic_collection::Entity::find()
            .filter(comic_collection::Column::CollectionId.eq(collection.id))
            .count(app.db())
            .await
            .unwrap(),
        1
    );

    let creators = CreatorRepository::creators_of_comic(app.db(), 20)
        .await
        .unwrap();
    assert_eq!(creators.len(), 1);
    assert_eq!(creators[0].id, 32);
}

#[tokio::test]
async fn test_same_comic_in_two_collections_shares_one_row() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let first = factory.create_collection(1, "First").await;
    let second = factory.create_collection(2, "Second").await;
    let record = factory.catalog_comic(5, &[STAN_LEE]);

    factory.add_comic(first.id, &record).await;
    factory.add_comic(second.id, &record).await;

    assert_eq!(comic::Entity::find().count(app.db()).await.unwrap(), 1);
    assert_eq!(
        comic_collection::Entity::find().count(app.db()).await.unwrap(),
        2
    );
    assert_eq!(
        comic_creator::Entity::find().count(app.db()).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_remove_collection_clears_links() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let doomed = factory.create_collection(1, "Doomed").await;
    let kept = factory.create_collection(1, "Kept").await;

    for id in [1, 2, 3] {
        factory.add_comic(doomed.id, &factory.plain_comic(id)).await;
    }
    factory.add_comic(kept.id, &factory.plain_comic(1)).await;

    CollectionRepository::delete(app.db(), doomed.id)
        .await
        .unwrap();

    let remaining_links = comic_collection::Entity::find()
        .filter(comic_collection::Column::CollectionId.eq(doomed.id))
        .count(app.db())
        .await
        .unwrap();
    assert_eq!(remaining_links, 0);
    assert!(collection::Entity::find_by_id(doomed.id)
        .one(app.db())
        .await
        .unwrap()
        .is_none());

    // Comic rows and other collections are untouched
    assert_eq!(comic::Entity::find().count(app.db()).await.unwrap(), 3);
    let kept = CollectionRepository::find_by_id(app.db(), kept.id)
        .await
        .unwrap();
    assert_eq!(kept.comics.len(), 1);

    // Removing again is a no-op
    CollectionRepository::delete(app.db(), doomed.id)
        .await
        .expect("second removal must not fail");
}

#[tokio::test]
async fn test_remove_comic_only_touches_target_pair() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let first = factory.create_collection(1, "First").await;
    let second = factory.create_collection(1, "Second").await;

    factory.add_comic(first.id, &factory.plain_comic(100)).await;
    factory.add_comic(first.id, &factory.plain_comic(200)).await;
    factory.add_comic(second.id, &factory.plain_comic(100)).await;

    CollectionRepository::remove_comic(app.db(), first.id, 100)
        .await
        .unwrap();

    let first = CollectionRepository::find_by_id(app.db(), first.id)
        .await
        .unwrap();
    let ids: Vec<i32> = first.comics.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![200]);

    let second = CollectionRepository::find_by_id(app.db(), second.id)
        .await
        .unwrap();
    let ids: Vec<i32> = second.comics.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![100]);

    // Removing a comic that isn't there is a no-op
    CollectionRepository::remove_comic(app.db(), first.id, 100)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive_contains() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory.create_collection(1, "Spider-Man Classics").await;
    factory.create_collection(2, "AMAZING SPIDERMAN").await;
    factory.create_collection(3, "X-Men").await;

    let found = CollectionRepository::search_by_name(app.db(), &search("spider", 10, 0))
        .await
        .unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Spider-Man Classics", "AMAZING SPIDERMAN"]);

    let all = CollectionRepository::search_by_name(app.db(), &search("", 10, 0))
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory.create_collection(1, "100% Marvel").await;
    factory.create_collection(1, "Marvel Masterworks").await;

    let found = CollectionRepository::search_by_name(app.db(), &search("%", 10, 0))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "100% Marvel");

    let found = CollectionRepository::search_by_name(app.db(), &search("_", 10, 0))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_search_pagination() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let mut ids = Vec::new();
    for n in 1..=5 {
        ids.push(factory.create_collection(1, &format!("Box {}", n)).await.id);
    }

    let page = CollectionRepository::search_by_name(app.db(), &search("box", 2, 1))
        .await
        .unwrap();
    let page_ids: Vec<i32> = page.iter().map(|c| c.id).collect();
    assert_eq!(page_ids, vec![ids[2], ids[3]]);

    let last = CollectionRepository::search_by_name(app.db(), &search("box", 2, 2))
        .await
        .unwrap();
    assert_eq!(last.len(), 1);

    let beyond = CollectionRepository::search_by_name(app.db(), &search("box", 2, 9))
        .await
        .unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn test_search_rejects_zero_page_size() {
    let app = TestApp::new().await;

    let err = CollectionRepository::search_by_name(app.db(), &search("", 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_search_for_user_filters_owner() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let mine = factory.create_collection(1, "Spider-Verse").await;
    factory.create_collection(2, "Spider-Verse").await;
    factory.create_collection(1, "Avengers").await;

    let found =
        CollectionRepository::search_by_name_for_user(app.db(), &search("SPIDER", 10, 0), 1)
            .await
            .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, mine.id);
    assert_eq!(found[0].user_id, 1);
}

#[tokio::test]
async fn test_list_by_user_filters_owner() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory.create_collection(1, "A").await;
    factory.create_collection(2, "B").await;
    factory.create_collection(1, "C").await;

    let collections = CollectionRepository::list_by_user(app.db(), 1)
        .await
        .unwrap();
    let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);

    let none = CollectionRepository::list_by_user(app.db(), 42)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_list_all_loads_comics_per_collection() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let first = factory.create_collection(1, "First").await;
    let second = factory.create_collection(2, "Second").await;
    factory.create_collection(3, "Empty").await;

    factory.add_comic(first.id, &factory.plain_comic(9)).await;
    factory.add_comic(first.id, &factory.plain_comic(3)).await;
    factory.add_comic(second.id, &factory.plain_comic(4)).await;

    let all = CollectionRepository::list_all(app.db()).await.unwrap();
    assert_eq!(all.len(), 3);

    let first_ids: Vec<i32> = all[0].comics.iter().map(|c| c.id).collect();
    assert_eq!(first_ids, vec![3, 9]);
    assert_eq!(all[1].comics.len(), 1);
    assert!(all[2].comics.is_empty());

    let paged = CollectionRepository::list(app.db(), 2, 2).await.unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].name, "Empty");
}

#[tokio::test]
async fn test_list_with_unaligned_offset() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    for n in 1..=5 {
        factory.create_collection(1, &format!("Box {}", n)).await;
    }

    let paged = CollectionRepository::list(app.db(), 2, 3).await.unwrap();
    let names: Vec<&str> = paged.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Box 4", "Box 5"]);

    let tail = CollectionRepository::list(app.db(), 3, 4).await.unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].name, "Box 5");
}

#[tokio::test]
async fn test_find_owner_id() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection(77, "Mine").await;

    let owner = CollectionRepository::find_owner_id(app.db(), collection.id)
        .await
        .unwrap();
    assert_eq!(owner, 77);

    let err = CollectionRepository::find_owner_id(app.db(), collection.id + 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_thumbnail() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection(1, "Covers").await;

    let empty = CollectionRepository::thumbnail(app.db(), collection.id)
        .await
        .unwrap();
    assert!(empty.is_none());

    factory.add_comic(collection.id, &factory.plain_comic(50)).await;
    factory.add_comic(collection.id, &factory.plain_comic(40)).await;

    // Lowest comic id wins
    let thumbnail = CollectionRepository::thumbnail(app.db(), collection.id)
        .await
        .unwrap();
    assert_eq!(
        thumbnail.as_deref(),
        Some("http://i.annihil.us/u/prod/marvel/i/mg/test/40.jpg")
    );
}
