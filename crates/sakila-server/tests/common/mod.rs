#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use sakila_db::{create_pool, DbPool, DbRuntimeSettings};
use sakila_server::{app, config::RentalsConfig, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot

/// Two copies of film 1, one each of films 2 and 3, none of film 4.
/// Rentals 3, 4 and 5 are active; customer 1 has two payments.
const FIXTURES: &str = "
    INSERT INTO address (address_id, address, district, phone)
        VALUES (1, '47 MySakila Drive', 'Alberta', '');
    INSERT INTO store (store_id, manager_staff_id, address_id) VALUES (1, 1, 1);
    INSERT INTO staff (staff_id, first_name, last_name, address_id, store_id, username)
        VALUES (1, 'Mike', 'Hillyer', 1, 1, 'Mike'), (2, 'Jon', 'Stephens', 1, 1, 'Jon');

    INSERT INTO film (film_id, title, description, release_year, language_id,
                      rental_duration, rental_rate, length, replacement_cost, rating,
                      special_features, last_update)
    VALUES
        (1, 'ACADEMY DINOSAUR', 'A Epic Drama', 2006, 1, 6, 0.99, 86, 20.99, 'PG',
         'Deleted Scenes,Behind the Scenes', '2006-02-15 05:03:42'),
        (2, 'ACE GOLDFINGER', 'A Astounding Epistle', 2006, 1, 3, 4.99, 48, 12.99, 'G',
         'Trailers', '2006-02-15 05:03:42'),
        (3, 'ADAPTATION HOLES', NULL, 2006, 1, 7, 2.99, 50, 18.99, 'NC-17',
         NULL, '2006-02-15 05:03:42'),
        (4, 'AFFAIR PREJUDICE', 'A Fanciful Documentary', 2006, 1, 5, 2.99, 117, 26.99,
         'G', 'Commentaries', '2006-02-15 05:03:42');

    INSERT INTO actor (actor_id, first_name, last_name) VALUES
        (1, 'PENELOPE', 'GUINESS'), (2, 'NICK', 'WAHLBERG'), (3, 'ED', 'CHASE');
    INSERT INTO film_actor (actor_id, film_id) VALUES
        (1, 1), (1, 2), (1, 4), (2, 2), (2, 3), (3, 4);

    INSERT INTO category (category_id, name) VALUES (1, 'Action'), (2, 'Comedy');
    INSERT INTO film_category (film_id, category_id) VALUES (1, 1), (2, 2), (3, 2);

    INSERT INTO inventory (inventory_id, film_id, store_id) VALUES
        (1, 1, 1), (2, 1, 1), (3, 2, 1), (4, 3, 1);

    INSERT INTO customer (customer_id, store_id, first_name, last_name, email,
                          address_id, active, create_date)
    VALUES
        (1, 1, 'MARY', 'SMITH', 'MARY.SMITH@sakilacustomer.org', 1, 1, '2006-02-14 22:04:36'),
        (2, 1, 'PATRICIA', 'JOHNSON', 'PATRICIA.JOHNSON@sakilacustomer.org', 1, 1,
         '2006-02-14 22:04:36'),
        (3, 1, 'LINDA', 'WILLIAMS', 'LINDA.WILLIAMS@sakilacustomer.org', 1, 1,
         '2006-02-14 22:04:36');

    INSERT INTO rental (rental_id, rental_date, inventory_id, customer_id, return_date, staff_id)
    VALUES
        (1, '2005-05-24 22:53:30', 1, 1, '2005-05-26 22:04:30', 1),
        (2, '2005-05-25 10:00:00', 1, 2, '2005-05-28 19:40:33', 1),
        (3, '2005-05-26 11:30:00', 3, 1, NULL, 1),
        (4, '2005-05-27 09:00:00', 4, 2, NULL, 1),
        (5, '2005-05-28 12:15:00', 2, 1, NULL, 1);

    INSERT INTO payment (payment_id, customer_id, staff_id, rental_id, amount, payment_date)
    VALUES
        (1, 1, 1, 1, 2.99, '2005-05-25 11:30:37'),
        (2, 1, 1, 3, 0.99, '2005-05-28 10:35:23'),
        (3, 2, 1, 2, 4.99, '2005-06-15 00:54:12');
";

/// Films 10-16 and actors 10-15, enough for every ranking to hit its limit.
///
/// Rentals per film: 10 → 6, 11 → 5, 12 → 4, 13 → 4, 14 → 3, 15 → 2, 16 → 1.
/// Actor 10 appears in all seven films.
pub const RANKING_FIXTURES: &str = "
    INSERT INTO film (film_id, title, language_id) VALUES
        (10, 'BUCKET BROTHERHOOD', 1), (11, 'ROCKETEER MOTHER', 1),
        (12, 'GRIT CLOCKWORK', 1), (13, 'JUGGLER HARDLY', 1),
        (14, 'FORWARD TEMPLE', 1), (15, 'SCALAWAG DUCK', 1),
        (16, 'APACHE DIVINE', 1);
    INSERT INTO inventory (inventory_id, film_id, store_id)
        SELECT film_id, film_id, 1 FROM film WHERE film_id >= 10;

    INSERT INTO actor (actor_id, first_name, last_name) VALUES
        (10, 'GINA', 'DEGENERES'), (11, 'WALTER', 'TORN'), (12, 'MARY', 'KEITEL'),
        (13, 'MATTHEW', 'CARREY'), (14, 'SANDRA', 'KILMER'), (15, 'SCARLETT', 'DAMON');
    INSERT INTO film_actor (actor_id, film_id) VALUES
        (10, 10), (10, 11), (10, 12), (10, 13), (10, 14), (10, 15), (10, 16),
        (11, 10), (11, 11), (11, 12), (11, 13), (11, 14),
        (12, 10), (12, 11), (12, 12),
        (13, 13), (13, 14), (13, 15),
        (14, 10), (14, 11),
        (15, 16);

    WITH RECURSIVE n(k) AS (SELECT 1 UNION ALL SELECT k + 1 FROM n WHERE k < 6)
    INSERT INTO rental (rental_date, inventory_id, customer_id, return_date, staff_id)
        SELECT '2005-06-01 10:00:00', i.inventory_id, 3, '2005-06-03 10:00:00', 1
        FROM inventory i
        JOIN n ON n.k <= CASE i.film_id
            WHEN 10 THEN 6 WHEN 11 THEN 5 WHEN 12 THEN 4 WHEN 13 THEN 4
            WHEN 14 THEN 3 WHEN 15 THEN 2 ELSE 1 END
        WHERE i.film_id >= 10;
";

/// A router over a seeded, file-backed database that lives as long as this value.
pub struct TestApp {
    pub app: Router,
    pub pool: DbPool,
    _dir: TempDir,
}

pub fn setup_app() -> TestApp {
    setup_app_with(RentalsConfig::default())
}

pub fn setup_app_with(rentals: RentalsConfig) -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("sakila.db");
    let pool = create_pool(
        path.to_str().expect("temp path should be utf-8"),
        DbRuntimeSettings::default(),
    )
    .expect("failed to create pool");

    {
        let conn = pool.get().expect("failed to get connection");
        sakila_db::run_migrations(&conn).expect("failed to run migrations");
        conn.execute_batch(FIXTURES).expect("failed to seed fixtures");
    }

    let state = AppState {
        pool: pool.clone(),
        rentals,
    };

    TestApp {
        app: app(state),
        pool,
        _dir: dir,
    }
}

/// Sends a request and returns the status with the JSON body (`Null` if not JSON).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should be served");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub fn seed(pool: &DbPool, sql: &str) {
    let conn = pool.get().expect("failed to get connection");
    conn.execute_batch(sql).expect("failed to seed rows");
}

pub fn count(pool: &DbPool, sql: &str) -> i64 {
    let conn = pool.get().expect("failed to get connection");
    conn.query_row(sql, [], |row| row.get(0))
        .expect("count query should succeed")
}
