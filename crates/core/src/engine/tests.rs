use super::*;
use crate::config::BreadcrumbsOptions;
use crate::models::{Author, Direction, Post, PostTypeInfo, Taxonomy, Term};
use crate::page::{Page, QueryVars};
use crate::site::SiteSnapshot;
use pretty_assertions::assert_eq;
use test_case::test_case;

const HOME: &str = "http://my.site/";

fn term(id: u64, name: &str, parent: Option<u64>, taxonomy: &str) -> Term {
    Term {
        id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        parent,
        taxonomy: taxonomy.to_string(),
    }
}

fn post(id: u64, post_type: &str, parent: Option<u64>, title: &str) -> Post {
    Post {
        id,
        post_type: post_type.to_string(),
        parent,
        title: title.to_string(),
    }
}

fn create_test_site() -> SiteSnapshot {
    SiteSnapshot::new(HOME)
        .with_post_type(PostTypeInfo {
            name: "tutorial".to_string(),
            label: "Tutorials".to_string(),
            hierarchical: false,
            has_archive: true,
        })
        .with_taxonomy(
            Taxonomy {
                slug: "level".to_string(),
                hierarchical: true,
            },
            vec!["tutorial".to_string()],
        )
        .with_post(post(11, "page", None, "Blog"))
        .with_post(post(4, "page", None, "About"))
        .with_post(post(5, "page", Some(4), "Team"))
        .with_post_in_terms(post(20, "post", None, "Election"), "category", vec![3])
        .with_post(post(21, "post", None, "Untagged"))
        .with_post(post(30, "tutorial", None, "Intro"))
        .with_term(term(3, "Politics", Some(5), "category"))
        .with_term(term(5, "News", None, "category"))
        .with_term(term(44, "Hotel Rooms", None, "post_tag"))
        .with_term(term(9, "Beginner", Some(7), "level"))
        .with_term(term(7, "Basic", None, "level"))
        .with_author(Author {
            id: 15,
            display_name: "Kofi Boakye".to_string(),
        })
}

fn request(types: &[&str], page_num: u32, query: QueryVars) -> RequestContext {
    RequestContext::new(Page::new(types.iter().copied()).with_number(page_num)).with_query(query)
}

fn config() -> BreadcrumbsConfig {
    BreadcrumbsOptions::new().with_home_label("Front").build()
}

fn collect(request: &RequestContext, site: &SiteSnapshot) -> Vec<Link> {
    Breadcrumbs::without_hooks(request, site, config()).links().to_vec()
}

fn linked(label: &str, url: &str) -> Link {
    Link::new(label, url)
}

fn plain(label: &str) -> Link {
    Link::label_only(label)
}

/// Home crumb, the given ancestors, then the crumb for the current page
fn expected(ancestors: Vec<Link>, label: &str, url: &str, page_num: u32) -> Vec<Link> {
    let mut links = vec![linked("Front", HOME)];
    links.extend(ancestors);
    if page_num > 1 {
        links.push(linked(label, url));
        links.push(plain(&format!("Page {}", page_num)));
    } else {
        links.push(plain(label));
    }
    links
}

#[test_case(&["front_page", "home"], 1 ; "front page showing posts")]
#[test_case(&["front_page", "home"], 5 ; "front page showing posts paged")]
#[test_case(&["front_page", "page"], 1 ; "static front page")]
#[test_case(&["front_page", "page"], 5 ; "static front page paged")]
fn test_front_page(types: &[&str], page_num: u32) {
    let links = collect(&request(types, page_num, QueryVars::default()), &create_test_site());

    if page_num > 1 {
        assert_eq!(links, vec![linked("Front", HOME), plain("Page 5")]);
    } else {
        assert_eq!(links, vec![plain("Front")]);
    }
}

#[test_case(1)]
#[test_case(5)]
fn test_blog_page(page_num: u32) {
    let site = create_test_site().with_posts_page(11);
    let links = collect(&request(&["home"], page_num, QueryVars::default()), &site);

    assert_eq!(links, expected(vec![], "Blog", "http://my.site/?page_id=11", page_num));
}

#[test_case(1)]
#[test_case(5)]
fn test_post_type_archive(page_num: u32) {
    let query = QueryVars {
        post_type: Some("tutorial".to_string()),
        ..Default::default()
    };
    let links = collect(
        &request(&["archive", "post_type_archive"], page_num, query),
        &create_test_site(),
    );

    assert_eq!(links, expected(vec![], "Tutorials", "http://my.site/tutorial/", page_num));
}

#[test_case(1)]
#[test_case(5)]
fn test_category_archive(page_num: u32) {
    let query = QueryVars {
        cat: Some(3),
        ..Default::default()
    };
    let links = collect(&request(&["archive", "category"], page_num, query), &create_test_site());

    assert_eq!(
        links,
        expected(
            vec![linked("News", "http://my.site/category/news/")],
            "Politics",
            "http://my.site/category/politics/",
            page_num
        )
    );
}

#[test_case(1)]
#[test_case(5)]
fn test_year_archive(page_num: u32) {
    let query = QueryVars {
        year: Some(1999),
        ..Default::default()
    };
    let links = collect(&request(&["date", "year", "archive"], page_num, query), &create_test_site());

    assert_eq!(links, expected(vec![], "1999", "http://my.site/1999/", page_num));
}

#[test_case(1)]
#[test_case(5)]
fn test_month_archive(page_num: u32) {
    let query = QueryVars {
        year: Some(1998),
        monthnum: Some(9),
        ..Default::default()
    };
    let links = collect(&request(&["date", "month", "archive"], page_num, query), &create_test_site());

    assert_eq!(
        links,
        expected(
            vec![linked("1998", "http://my.site/1998/")],
            "Sep 1998",
            "http://my.site/1998/09/",
            page_num
        )
    );
}

#[test_case(1)]
#[test_case(5)]
fn test_day_archive(page_num: u32) {
    let query = QueryVars {
        year: Some(2001),
        monthnum: Some(4),
        day: Some(4),
        ..Default::default()
    };
    let links = collect(&request(&["date", "day", "archive"], page_num, query), &create_test_site());

    assert_eq!(
        links,
        expected(
            vec![
                linked("2001", "http://my.site/2001/"),
                linked("Apr 2001", "http://my.site/2001/04/"),
            ],
            "04 Apr 2001",
            "http://my.site/2001/04/04/",
            page_num
        )
    );
}

#[test]
fn test_invalid_date_falls_back_to_numbers() {
    let query = QueryVars {
        year: Some(2001),
        monthnum: Some(2),
        day: Some(31),
        ..Default::default()
    };
    let links = collect(&request(&["day", "date"], 1, query), &create_test_site());

    assert_eq!(links[2], linked("2001-02", "http://my.site/2001/02/"));
    assert_eq!(links[3], plain("2001-02-31"));
}

#[test_case(1)]
#[test_case(5)]
fn test_search_archive(page_num: u32) {
    let query = QueryVars {
        search: Some("search query".to_string()),
        ..Default::default()
    };
    let links = collect(&request(&["search", "archive"], page_num, query), &create_test_site());

    assert_eq!(
        links,
        expected(
            vec![],
            "\u{201c}search query\u{201d}",
            "http://my.site/?s=search+query",
            page_num
        )
    );
}

#[test_case(1)]
#[test_case(5)]
fn test_tag_archive(page_num: u32) {
    let query = QueryVars {
        tag_id: Some(44),
        ..Default::default()
    };
    let links = collect(&request(&["tag", "archive"], page_num, query), &create_test_site());

    assert_eq!(links, expected(vec![], "Hotel Rooms", "http://my.site/tag/hotel-rooms/", page_num));
}

#[test_case(1)]
#[test_case(5)]
fn test_author_archive(page_num: u32) {
    let query = QueryVars {
        author: Some(15),
        ..Default::default()
    };
    let links = collect(&request(&["author", "archive"], page_num, query), &create_test_site());

    assert_eq!(links, expected(vec![], "Kofi Boakye", "http://my.site/author/15/", page_num));
}

#[test_case(1)]
#[test_case(5)]
fn test_not_found_never_paged(page_num: u32) {
    let links = collect(&request(&["404"], page_num, QueryVars::default()), &create_test_site());

    assert_eq!(links, vec![linked("Front", HOME), plain("Error 404")]);
}

#[test_case(1)]
#[test_case(5)]
fn test_taxonomy_archive(page_num: u32) {
    let query = QueryVars {
        taxonomy: Some("level".to_string()),
        term: Some("beginner".to_string()),
        ..Default::default()
    };
    let links = collect(&request(&["tax", "archive"], page_num, query), &create_test_site());

    assert_eq!(
        links,
        expected(
            vec![linked("Basic", "http://my.site/level/basic/")],
            "Beginner",
            "http://my.site/level/beginner/",
            page_num
        )
    );
}

#[test_case(1)]
#[test_case(5)]
fn test_singular_with_parent(page_num: u32) {
    let query = QueryVars {
        p: Some(5),
        ..Default::default()
    };
    let links = collect(&request(&["singular", "page"], page_num, query), &create_test_site());

    assert_eq!(
        links,
        expected(
            vec![linked("About", "http://my.site/?page_id=4")],
            "Team",
            "http://my.site/?page_id=5",
            page_num
        )
    );
}

#[test_case(1)]
#[test_case(5)]
fn test_singular_with_terms(page_num: u32) {
    let query = QueryVars {
        p: Some(20),
        ..Default::default()
    };
    let links = collect(&request(&["singular", "single"], page_num, query), &create_test_site());

    assert_eq!(
        links,
        expected(
            vec![
                linked("News", "http://my.site/category/news/"),
                linked("Politics", "http://my.site/category/politics/"),
            ],
            "Election",
            "http://my.site/?p=20",
            page_num
        )
    );
}

#[test_case(1)]
#[test_case(5)]
fn test_singular_custom_type_links_archive(page_num: u32) {
    let query = QueryVars {
        p: Some(30),
        ..Default::default()
    };
    let links = collect(&request(&["singular", "single"], page_num, query), &create_test_site());

    assert_eq!(
        links,
        expected(
            vec![linked("Tutorials", "http://my.site/tutorial/")],
            "Intro",
            "http://my.site/?p=30",
            page_num
        )
    );
}

#[test]
fn test_singular_default_type_without_posts_page() {
    let query = QueryVars {
        p: Some(21),
        ..Default::default()
    };
    let links = collect(&request(&["singular", "single"], 1, query), &create_test_site());

    assert_eq!(links, vec![linked("Front", HOME), plain("Untagged")]);
}

#[test]
fn test_singular_default_type_with_posts_page() {
    let site = create_test_site().with_posts_page(11);
    let query = QueryVars {
        p: Some(21),
        ..Default::default()
    };
    let links = collect(&request(&["singular", "single"], 1, query), &site);

    assert_eq!(
        links,
        vec![
            linked("Front", HOME),
            linked("Blog", "http://my.site/?page_id=11"),
            plain("Untagged"),
        ]
    );
}

#[test]
fn test_singular_uses_supplied_post() {
    let site = create_test_site();
    let request = RequestContext::new(Page::new(["singular"])).with_post(post(5, "page", Some(4), "Team"));

    let links = collect(&request, &site);
    assert_eq!(
        links,
        vec![
            linked("Front", HOME),
            linked("About", "http://my.site/?page_id=4"),
            plain("Team"),
        ]
    );
}

#[test]
fn test_singular_zero_parent_falls_back_to_terms() {
    let site = create_test_site().with_post_in_terms(post(40, "post", Some(0), "Zero"), "category", vec![3]);
    let query = QueryVars {
        p: Some(40),
        ..Default::default()
    };
    let links = collect(&request(&["singular", "single"], 1, query), &site);

    assert_eq!(
        links,
        vec![
            linked("Front", HOME),
            linked("News", "http://my.site/category/news/"),
            linked("Politics", "http://my.site/category/politics/"),
            plain("Zero"),
        ]
    );
}

#[test]
fn test_singular_without_post() {
    let links = collect(&request(&["singular"], 1, QueryVars::default()), &create_test_site());
    assert_eq!(links, vec![linked("Front", HOME)]);
}

#[test_case(1)]
#[test_case(5)]
fn test_unknown_page_type(page_num: u32) {
    let links = collect(&request(&["feed"], page_num, QueryVars::default()), &create_test_site());

    let mut want = vec![linked("Front", HOME)];
    if page_num > 1 {
        want.push(plain("Page 5"));
    }
    assert_eq!(links, want);
}

#[test]
fn test_first_matching_handler_wins() {
    let query = QueryVars {
        tag_id: Some(44),
        author: Some(15),
        ..Default::default()
    };
    let links = collect(&request(&["archive", "tag", "author"], 1, query), &create_test_site());

    assert_eq!(links, vec![linked("Front", HOME), plain("Hotel Rooms")]);
}

#[test]
fn test_missing_ancestor_stops_walk() {
    let site = create_test_site().with_term(term(60, "Orphan", Some(99), "category"));
    let query = QueryVars {
        cat: Some(60),
        ..Default::default()
    };
    let links = collect(&request(&["category"], 1, query), &site);

    assert_eq!(links, vec![linked("Front", HOME), plain("Orphan")]);
}

#[test]
fn test_cyclic_parents_terminate() {
    let site = create_test_site()
        .with_term(term(70, "Chicken", Some(71), "category"))
        .with_term(term(71, "Egg", Some(70), "category"));
    let query = QueryVars {
        cat: Some(70),
        ..Default::default()
    };
    let links = collect(&request(&["category"], 1, query), &site);

    assert_eq!(
        links,
        vec![
            linked("Front", HOME),
            linked("Chicken", "http://my.site/category/chicken/"),
            linked("Egg", "http://my.site/category/egg/"),
            plain("Chicken"),
        ]
    );
}

#[test]
fn test_unknown_taxonomy_degrades_to_label() {
    let site = create_test_site().with_term(term(80, "Loose", None, "unregistered"));
    let query = QueryVars {
        taxonomy: Some("unregistered".to_string()),
        term: Some("loose".to_string()),
        ..Default::default()
    };
    let links = collect(&request(&["tax"], 5, query), &site);

    assert_eq!(links, vec![linked("Front", HOME), plain("Loose"), plain("Page 5")]);
}

#[test]
fn test_hooks_replace_links() {
    let mut hooks = Hooks::new();
    hooks.add_filter(|links: Vec<Link>, types: &[PageType]| -> Vec<Link> {
        assert!(types.contains(&PageType::Search));
        links.into_iter().skip(1).collect()
    });

    let query = QueryVars {
        search: Some("cats".to_string()),
        ..Default::default()
    };
    let breadcrumbs = Breadcrumbs::new(
        &request(&["search"], 1, query),
        &create_test_site(),
        config(),
        &hooks,
    );

    assert_eq!(breadcrumbs.links(), &[plain("\u{201c}cats\u{201d}")]);
}

#[test]
fn test_render_is_idempotent() {
    let query = QueryVars {
        cat: Some(3),
        ..Default::default()
    };
    let breadcrumbs =
        Breadcrumbs::without_hooks(&request(&["category", "archive"], 5, query), &create_test_site(), config());

    let first = breadcrumbs.render();
    assert_eq!(first, breadcrumbs.render());
    assert_eq!(breadcrumbs.path(), "Front > News > Politics > Page 5");
    assert!(first.ends_with(r#"<span class="item">Page 5</span></nav>"#));
}

#[test]
fn test_rtl_render_reverses_trail() {
    let query = QueryVars {
        cat: Some(3),
        ..Default::default()
    };
    let req = request(&["category"], 1, query);
    let site = create_test_site();

    let options = BreadcrumbsOptions::new()
        .with_home_label("Front")
        .with_delimiter("|")
        .with_before("B")
        .with_after("A");
    let ltr = Breadcrumbs::without_hooks(&req, &site, options.clone().build());
    let rtl = Breadcrumbs::without_hooks(&req, &site, options.with_direction(Direction::Rtl).build());

    let strip = |html: String| {
        html.trim_start_matches(r#"<nav class="breadcrumbs">"#)
            .trim_end_matches("</nav>")
            .to_string()
    };
    let ltr_parts: Vec<String> = strip(ltr.render())
        .split(r#" <span class="sep delimiter">|</span> "#)
        .map(str::to_string)
        .collect();
    let rtl_parts: Vec<String> = strip(rtl.render())
        .split(r#" <span class="sep delimiter">|</span> "#)
        .map(str::to_string)
        .collect();

    assert_eq!(ltr_parts.len(), 3);
    assert_eq!(ltr_parts[0], r#"<span class="before">B</span> <a href="http://my.site/"><span class="item">Front</span></a>"#);
    assert_eq!(rtl_parts[0], r#"<span class="after">A</span> <span class="item">Politics</span>"#);
    assert_eq!(rtl_parts[2], r#"<a href="http://my.site/"><span class="item">Front</span></a> <span class="before">B</span>"#);
    assert_eq!(ltr_parts[1], rtl_parts[1]);
}

#[test]
fn test_front_page_render() {
    let breadcrumbs = Breadcrumbs::without_hooks(
        &request(&["front_page"], 1, QueryVars::default()),
        &create_test_site(),
        BreadcrumbsConfig::default(),
    );

    assert_eq!(
        breadcrumbs.render(),
        r#"<nav class="breadcrumbs"><span class="item">Home</span></nav>"#
    );
}
