//! Repository tests for contacts and the public content tables.

use careline_core::contact::ContactStatus;
use careline_core::pagination::PageRequest;
use careline_db::models::bank_option::CreateBankOption;
use careline_db::models::contact::{ContactFilter, CreateContact};
use careline_db::models::footer::{QuickLink, SocialLink, UpdateFooterSettings};
use careline_db::models::gallery::{CreateGalleryCategory, CreateGalleryItem, GalleryItemFilter};
use careline_db::models::media::CreateMediaFile;
use careline_db::models::program::{CreateProgram, CreateProgramProject, UpdateProgram};
use careline_db::repositories::{
    BankOptionRepo, ContactRepo, FooterRepo, GalleryCategoryRepo, GalleryItemRepo, MediaRepo,
    ProgramProjectRepo, ProgramRepo,
};
use sqlx::PgPool;

fn new_program(slug: &str, category: &str, published: bool) -> CreateProgram {
    CreateProgram {
        slug: slug.to_string(),
        category_id: category.to_string(),
        title_en: format!("Program {slug}"),
        title_fr: None,
        description_en: None,
        description_fr: None,
        image_url: None,
        thumbnail_url: None,
        sort_order: None,
        is_published: Some(published),
    }
}

fn new_project(title: &str, sort_order: i32) -> CreateProgramProject {
    CreateProgramProject {
        title_en: title.to_string(),
        title_fr: None,
        description_en: None,
        description_fr: None,
        image_url: None,
        sort_order: Some(sort_order),
    }
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_contact_inbox_flow(pool: PgPool) {
    let contact = ContactRepo::create(
        &pool,
        &CreateContact {
            full_name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
            phone: None,
            subject: Some("Volunteering".to_string()),
            message: "How can I help?".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(contact.status().unwrap(), ContactStatus::New);

    let read = ContactRepo::update_status(&pool, contact.id, ContactStatus::New, ContactStatus::Read)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(read.status, "read");

    let new_only = ContactFilter {
        status: Some(ContactStatus::New),
        ..Default::default()
    };
    assert_eq!(ContactRepo::count(&pool, &new_only).await.unwrap(), 0);

    let by_subject = ContactFilter {
        search: Some("volunteer".to_string()),
        ..Default::default()
    };
    let found = ContactRepo::list(&pool, &by_subject, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    assert!(ContactRepo::delete(&pool, contact.id).await.unwrap());
    assert!(ContactRepo::find_by_id(&pool, contact.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_program_slug_is_unique(pool: PgPool) {
    ProgramRepo::create(&pool, &new_program("maternal-care", "health", true))
        .await
        .unwrap();
    let err = ProgramRepo::create(&pool, &new_program("maternal-care", "health", true))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("uq_programs_slug"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_published_only_listing(pool: PgPool) {
    ProgramRepo::create(&pool, &new_program("a", "health", true)).await.unwrap();
    ProgramRepo::create(&pool, &new_program("b", "health", false)).await.unwrap();
    ProgramRepo::create(&pool, &new_program("c", "education", true)).await.unwrap();

    assert_eq!(ProgramRepo::list(&pool, None, false).await.unwrap().len(), 3);
    assert_eq!(ProgramRepo::list(&pool, None, true).await.unwrap().len(), 2);
    assert_eq!(ProgramRepo::list(&pool, Some("health"), true).await.unwrap().len(), 1);

    assert!(ProgramRepo::find_by_slug(&pool, "b", true).await.unwrap().is_none());
    assert!(ProgramRepo::find_by_slug(&pool, "b", false).await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_projects_are_scoped_and_ordered(pool: PgPool) {
    let program = ProgramRepo::create(&pool, &new_program("a", "health", true))
        .await
        .unwrap();
    let other = ProgramRepo::create(&pool, &new_program("b", "health", true))
        .await
        .unwrap();

    ProgramProjectRepo::create(&pool, program.id, &new_project("Second", 2))
        .await
        .unwrap();
    let first = ProgramProjectRepo::create(&pool, program.id, &new_project("First", 1))
        .await
        .unwrap();

    let projects = ProgramProjectRepo::list_for_program(&pool, program.id)
        .await
        .unwrap();
    let titles: Vec<&str> = projects.iter().map(|p| p.title_en.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);

    // Wrong parent: treated as missing.
    assert!(!ProgramProjectRepo::delete(&pool, other.id, first.id).await.unwrap());

    // Deleting the program cascades to its projects.
    ProgramRepo::delete(&pool, program.id).await.unwrap();
    assert!(ProgramProjectRepo::list_for_program(&pool, program.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_program_partial_update(pool: PgPool) {
    let program = ProgramRepo::create(&pool, &new_program("a", "health", true))
        .await
        .unwrap();
    let updated = ProgramRepo::update(
        &pool,
        program.id,
        &UpdateProgram {
            title_fr: Some("Programme A".to_string()),
            is_published: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title_fr, "Programme A");
    assert_eq!(updated.title_en, "Program a");
    assert!(!updated.is_published);
}

// ---------------------------------------------------------------------------
// Bank options, gallery, footer, media
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_bank_option_defaults_and_active_listing(pool: PgPool) {
    let input = CreateBankOption {
        bank_name: "First Bank".to_string(),
        account_name: "Careline".to_string(),
        account_number: "000123".to_string(),
        iban: None,
        swift_code: None,
        currency: None,
        logo_url: None,
        instructions_en: None,
        instructions_fr: None,
        is_active: None,
        sort_order: None,
    };
    let active = BankOptionRepo::create(&pool, &input).await.unwrap();
    assert_eq!(active.currency, "USD");
    assert!(active.is_active);

    let hidden = CreateBankOption {
        is_active: Some(false),
        ..input
    };
    BankOptionRepo::create(&pool, &hidden).await.unwrap();

    assert_eq!(BankOptionRepo::list(&pool, true).await.unwrap().len(), 1);
    assert_eq!(BankOptionRepo::list(&pool, false).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gallery_filter_by_category_slug(pool: PgPool) {
    let events = GalleryCategoryRepo::create(
        &pool,
        &CreateGalleryCategory {
            slug: "events".to_string(),
            name_en: "Events".to_string(),
            name_fr: Some("Événements".to_string()),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let item = |category_id, published| CreateGalleryItem {
        category_id,
        title_en: None,
        title_fr: None,
        media_url: "/uploads/gallery/2030/05/a.jpg".to_string(),
        thumbnail_url: None,
        media_type: None,
        sort_order: None,
        is_published: Some(published),
    };
    let created = GalleryItemRepo::create(&pool, &item(Some(events.id), true))
        .await
        .unwrap();
    assert_eq!(created.media_type, "image");
    GalleryItemRepo::create(&pool, &item(Some(events.id), false))
        .await
        .unwrap();
    GalleryItemRepo::create(&pool, &item(None, true)).await.unwrap();

    let public_events = GalleryItemFilter {
        category_slug: Some("events".to_string()),
        published_only: true,
        ..Default::default()
    };
    assert_eq!(GalleryItemRepo::count(&pool, &public_events).await.unwrap(), 1);

    let all = GalleryItemFilter::default();
    assert_eq!(GalleryItemRepo::count(&pool, &all).await.unwrap(), 3);

    // Deleting the category keeps its items, uncategorised.
    GalleryCategoryRepo::delete(&pool, events.id).await.unwrap();
    let reloaded = GalleryItemRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.category_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_footer_upsert_merges(pool: PgPool) {
    assert!(FooterRepo::get(&pool).await.unwrap().is_none());

    let first = FooterRepo::upsert(
        &pool,
        &UpdateFooterSettings {
            about_en: Some("We care.".to_string()),
            social_links: Some(vec![SocialLink {
                platform: "facebook".to_string(),
                url: "https://facebook.com/careline".to_string(),
            }]),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();
    assert_eq!(first.about_en, "We care.");
    assert_eq!(first.social_links.0.len(), 1);
    assert!(first.quick_links.0.is_empty());

    let second = FooterRepo::upsert(
        &pool,
        &UpdateFooterSettings {
            quick_links: Some(vec![QuickLink {
                label_en: "Donate".to_string(),
                label_fr: "Faire un don".to_string(),
                url: "/donate".to_string(),
            }]),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();
    assert_eq!(second.about_en, "We care.");
    assert_eq!(second.social_links.0.len(), 1);
    assert_eq!(second.quick_links.0[0].url, "/donate");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_media_delete_returns_row(pool: PgPool) {
    let file = MediaRepo::create(
        &pool,
        &CreateMediaFile {
            original_name: "team.png".to_string(),
            stored_path: "gallery/2030/05/abc.png".to_string(),
            url: "/uploads/gallery/2030/05/abc.png".to_string(),
            content_type: "image/png".to_string(),
            kind: "image".to_string(),
            size_bytes: 2048,
            folder: "gallery".to_string(),
            uploaded_by: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(MediaRepo::count(&pool, Some("gallery"), None).await.unwrap(), 1);
    assert_eq!(MediaRepo::count(&pool, Some("logos"), None).await.unwrap(), 0);

    let deleted = MediaRepo::delete(&pool, file.id).await.unwrap().unwrap();
    assert_eq!(deleted.stored_path, "gallery/2030/05/abc.png");
    assert!(MediaRepo::delete(&pool, file.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_new_content_starts_as_draft(pool: PgPool) {
    let program = ProgramRepo::create(
        &pool,
        &CreateProgram {
            is_published: None,
            ..new_program("nutrition", "health", true)
        },
    )
    .await
    .unwrap();
    assert!(!program.is_published);
    assert!(ProgramRepo::find_by_slug(&pool, "nutrition", true)
        .await
        .unwrap()
        .is_none());

    let item = GalleryItemRepo::create(
        &pool,
        &CreateGalleryItem {
            category_id: None,
            title_en: None,
            title_fr: None,
            media_url: "/uploads/gallery/2030/05/b.jpg".to_string(),
            thumbnail_url: None,
            media_type: None,
            sort_order: None,
            is_published: None,
        },
    )
    .await
    .unwrap();
    assert!(!item.is_published);
    let public = GalleryItemFilter {
        published_only: true,
        ..Default::default()
    };
    assert_eq!(GalleryItemRepo::count(&pool, &public).await.unwrap(), 0);
}
