//! Integration tests for `DieselOfficeRepository` against embedded PostgreSQL.
//!
//! Each test gets its own cluster and a freshly migrated database seeded
//! through a plain `postgres` client, so the listing SQL, the aggregate
//! loader and the creation transaction all run against the real schema.

use office_listings::domain::ports::OfficeRepository;
use office_listings::domain::{
    ApprovalStatus, Coordinates, NewOffice, OfficeCreation, OfficeId, OfficeListingFilter, TagId,
    UserId,
};
use office_listings::outbound::persistence::{
    DbPool, DieselOfficeRepository, PoolConfig, run_migrations,
};
use pagination::PageRequest;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{format_postgres_error, fresh_database, handle_cluster_setup_failure, test_cluster};

const TEST_DB: &str = "diesel_office_repository_test";

const HOST: i64 = 1;
const OTHER_HOST: i64 = 2;
const VISITOR: i64 = 3;

// Offices take serial ids 1..=5 in insertion order.
const DHAKA_OFFICE: i64 = 1;
const HIDDEN_OFFICE: i64 = 2;
const DELETED_OFFICE: i64 = 4;
const RAJSHAHI_OFFICE: i64 = 5;

const SEED: &str = "
INSERT INTO users (name, email) VALUES
    ('Ada', 'ada@example.com'),
    ('Grace', 'grace@example.com'),
    ('Visitor', 'visitor@example.com');

INSERT INTO offices (user_id, title, description, latitude, longitude, address_line1,
                     approval_status, hidden, price_per_day, deleted_at) VALUES
    (1, 'Dhaka', 'Desks', 24.3613168287183, 88.60688992824939, '1 Lake Road', 2, FALSE, 1000, NULL),
    (1, 'Hidden', 'Desks', 24.0, 88.0, '2 Lake Road', 2, TRUE, 1000, NULL),
    (1, 'Pending', 'Desks', 24.0, 88.0, '3 Lake Road', 1, FALSE, 1000, NULL),
    (1, 'Deleted', 'Desks', 24.0, 88.0, '4 Lake Road', 2, FALSE, 1000, NOW()),
    (2, 'Rajshahi', 'Desks', 23.73977582064981, 90.38269976914796, '5 River Road', 2, FALSE, 1000, NULL);

INSERT INTO offices_tags (office_id, tag_id) VALUES (1, 1), (1, 3);

INSERT INTO images (resource_type, resource_id, path) VALUES ('office', 1, 'offices/dhaka.jpg');

INSERT INTO reservations (user_id, office_id, price, status, start_date, end_date) VALUES
    (3, 1, 1000, 1, '2024-06-01', '2024-06-02'),
    (3, 1, 1000, 1, '2024-07-01', '2024-07-02'),
    (3, 1, 1000, 2, '2024-08-01', '2024-08-02'),
    (3, 5, 1000, 1, '2024-06-01', '2024-06-02'),
    (3, 2, 1000, 1, '2024-06-01', '2024-06-02');
";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselOfficeRepository,
    database_url: String,
}

impl TestContext {
    fn listed(&self, filter: OfficeListingFilter) -> (Vec<i64>, u64) {
        let request = PageRequest::new(1, 20).expect("valid page");
        let page = self
            .runtime
            .block_on(self.repository.list_office_ids(&filter, request))
            .expect("listing succeeds");
        let ids = page.items().iter().map(|id| id.value()).collect();
        (ids, page.total())
    }

    fn office_rows(&self) -> i64 {
        let mut client = Client::connect(&self.database_url, NoTls).expect("connect");
        client
            .query_one("SELECT count(*) FROM offices", &[])
            .expect("count offices")
            .get(0)
    }
}

fn seed(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(SEED)
        .map_err(|err| format_postgres_error(&err))
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = fresh_database(&cluster, TEST_DB)?;
    runtime
        .block_on(run_migrations(&database_url))
        .map_err(|err| err.to_string())?;
    seed(&database_url)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselOfficeRepository::new(pool),
        database_url,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn point(latitude: &str, longitude: &str) -> Coordinates {
    Coordinates::new(
        latitude.parse::<Decimal>().expect("decimal"),
        longitude.parse::<Decimal>().expect("decimal"),
    )
}

fn new_office(tags: &[i64]) -> NewOffice {
    NewOffice {
        host_id: UserId::new(HOST),
        title: "Riverside studio".to_owned(),
        description: "Quiet desks".to_owned(),
        location: point("23.73977582064981", "90.38269976914796"),
        address_line1: "4 Ferry Ghat".to_owned(),
        hidden: false,
        price_per_day: 10_000,
        monthly_discount: 5,
        tags: tags.iter().copied().map(TagId::new).collect(),
    }
}

#[rstest]
fn listing_filters_and_counts_match_the_schema(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: listing_filters_and_counts_match_the_schema skipped");
        return;
    };

    assert_eq!(
        context.listed(OfficeListingFilter::default()),
        (vec![DHAKA_OFFICE, RAJSHAHI_OFFICE], 2)
    );
    assert_eq!(
        context.listed(OfficeListingFilter::default().with_host(UserId::new(HOST))),
        (vec![DHAKA_OFFICE], 1)
    );
    assert_eq!(
        context.listed(OfficeListingFilter::default().with_host(UserId::new(OTHER_HOST))),
        (vec![RAJSHAHI_OFFICE], 1)
    );
    // Three reservations on the Dhaka office still list it once.
    assert_eq!(
        context.listed(OfficeListingFilter::default().with_visitor(UserId::new(VISITOR))),
        (vec![DHAKA_OFFICE, RAJSHAHI_OFFICE], 2)
    );
}

#[rstest]
fn listing_near_a_point_orders_by_distance(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: listing_near_a_point_orders_by_distance skipped");
        return;
    };

    let near_rajshahi = point("23.73977582064981", "90.38269976914796");
    assert_eq!(
        context.listed(OfficeListingFilter::default().near(near_rajshahi)),
        (vec![RAJSHAHI_OFFICE, DHAKA_OFFICE], 2)
    );

    let near_dhaka = point("24.3613168287183", "88.60688992824939");
    assert_eq!(
        context.listed(OfficeListingFilter::default().near(near_dhaka)),
        (vec![DHAKA_OFFICE, RAJSHAHI_OFFICE], 2)
    );
}

#[rstest]
fn aggregates_keep_request_order_and_count_active_reservations(
    repo_context: Option<TestContext>,
) {
    let Some(context) = repo_context else {
        eprintln!(
            "SKIP-TEST-CLUSTER: aggregates_keep_request_order_and_count_active_reservations skipped"
        );
        return;
    };

    let ids = [
        OfficeId::new(RAJSHAHI_OFFICE),
        OfficeId::new(DELETED_OFFICE),
        OfficeId::new(DHAKA_OFFICE),
        OfficeId::new(HIDDEN_OFFICE),
    ];
    let aggregates = context
        .runtime
        .block_on(context.repository.load_aggregates(&ids))
        .expect("aggregates load");

    let order: Vec<i64> = aggregates.iter().map(|a| a.office.id.value()).collect();
    assert_eq!(order, vec![RAJSHAHI_OFFICE, DHAKA_OFFICE, HIDDEN_OFFICE]);

    let dhaka = &aggregates[1];
    assert_eq!(dhaka.host.name, "Ada");
    assert_eq!(dhaka.active_reservations, 2);
    let tags: Vec<&str> = dhaka.tags.iter().map(|tag| tag.name.as_str()).collect();
    assert_eq!(tags, vec!["has_ac", "has_coffee_machine"]);
    assert_eq!(dhaka.images.len(), 1);
    assert_eq!(dhaka.office.location.latitude().to_string(), "24.36131683");
    assert_eq!(dhaka.office.location.longitude().to_string(), "88.60688993");
    assert_eq!(aggregates[2].office.approval_status, ApprovalStatus::Approved);
    assert!(aggregates[2].office.hidden);
}

#[rstest]
fn creation_stores_a_pending_office_with_its_tags(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: creation_stores_a_pending_office_with_its_tags skipped");
        return;
    };

    let outcome = context
        .runtime
        .block_on(context.repository.create_office(&new_office(&[1, 2])))
        .expect("insert succeeds");
    let OfficeCreation::Created(id) = outcome else {
        panic!("expected a stored office, got {outcome:?}");
    };

    let aggregates = context
        .runtime
        .block_on(context.repository.load_aggregates(&[id]))
        .expect("aggregate loads");
    let created = &aggregates[0];
    assert_eq!(created.office.approval_status, ApprovalStatus::Pending);
    assert_eq!(created.office.monthly_discount, 5);
    assert_eq!(created.office.location.latitude().to_string(), "23.73977582");
    let tags: Vec<i64> = created.tags.iter().map(|tag| tag.id.value()).collect();
    assert_eq!(tags, vec![1, 2]);
}

#[rstest]
fn creation_with_a_missing_tag_leaves_no_office_behind(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: creation_with_a_missing_tag_leaves_no_office_behind skipped");
        return;
    };
    let before = context.office_rows();

    let outcome = context
        .runtime
        .block_on(context.repository.create_office(&new_office(&[1, 999])))
        .expect("store reachable");

    assert_eq!(outcome, OfficeCreation::UnknownTags(vec![TagId::new(999)]));
    assert_eq!(context.office_rows(), before);
}
