use starquery::{
    interpret, InterpreterError, LevelState, MissionError, QueryResult, SessionController,
    SessionError, FIELDS, MISMATCH_MESSAGE,
};

#[test]
fn full_campaign_walkthrough() {
    let mut session = SessionController::new().expect("session");

    assert_eq!(session.submit("SELECT * FROM planets;").expect("m1"), LevelState::Success);
    session.advance().expect("advance to 2");

    assert_eq!(
        session
            .submit("select * from planets where resource = 'Water'")
            .expect("m2"),
        LevelState::Success
    );
    session.advance().expect("advance to 3");

    assert_eq!(
        session
            .submit(
                "INSERT INTO planets (name, type, gravity, resource) \
                 VALUES ('Kepler', 'Rocky', 9.8, 'Iron');"
            )
            .expect("m3"),
        LevelState::Success
    );
    let added = &session.table()[5];
    assert_eq!(added.id, 6);
    assert_eq!(added.name, "Zentari");
    assert_eq!(added.resource, "Unknown");
    session.advance().expect("advance to 4");

    assert_eq!(
        session
            .submit("SELECT type, COUNT(*) FROM planets GROUP BY type;")
            .expect("m4"),
        LevelState::Success
    );
    assert!(session.is_campaign_complete());

    assert!(matches!(
        session.advance(),
        Err(SessionError::Mission(MissionError::CampaignComplete))
    ));
    assert_eq!(session.current_mission().id, 4);
    assert_eq!(session.state(), LevelState::Success);
    assert_eq!(session.history().count(), 4);
}

#[test]
fn select_star_returns_seed_in_field_order() {
    let session = SessionController::new().expect("session");
    let result = interpret("select * from planets", session.table()).expect("select");
    assert_eq!(result.row_count(), 5);
    assert_eq!(result.fields(), FIELDS);
}

#[test]
fn water_query_completes_second_mission_only() {
    let mut session = SessionController::new().expect("session");
    let query = "select * from planets where resource = 'Water'";
    assert_eq!(session.submit(query).expect("m1"), LevelState::Error);
    assert_eq!(session.last_error(), Some(MISMATCH_MESSAGE));

    session.submit("select * from planets").expect("m1");
    session.advance().expect("advance");
    assert_eq!(session.submit(query).expect("m2"), LevelState::Success);
}

#[test]
fn second_insert_gets_next_id() {
    let mut session = SessionController::new().expect("session");
    session
        .submit("insert into planets (name) values ('a')")
        .expect("insert");
    session
        .submit("insert into planets (name) values ('b')")
        .expect("insert");
    let ids: Vec<u64> = session.table().iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    assert!(session.table()[5..].iter().all(|record| record.name == "Zentari"));
}

#[test]
fn group_by_ignores_table_state() {
    let mut session = SessionController::new().expect("session");
    session
        .submit("insert into planets (name) values ('a')")
        .expect("insert");
    let result = interpret("select type, count(*) from planets group by type", session.table())
        .expect("aggregate");
    let QueryResult::Aggregate { rows, fields } = result else {
        panic!("expected aggregate");
    };
    assert_eq!(fields, ["type", "count"]);
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|row| row.count == 1));
}

#[test]
fn errors_leave_mission_and_table_alone() {
    let mut session = SessionController::new().expect("session");
    for query in [
        "",
        "select nonexistent_column from planets",
        "select * from moons",
        "insert into planets values (1)",
        "drop table planets",
    ] {
        assert_eq!(session.submit(query).expect("submit"), LevelState::Error, "{query}");
        assert_eq!(session.table().len(), 5);
        assert_eq!(session.current_mission().id, 1);
        assert!(session.last_result().is_none());
    }
    assert_eq!(
        interpret("select nonexistent_column from planets", session.table()),
        Err(InterpreterError::UnknownColumn("nonexistent_column".to_string()))
    );
}

#[test]
fn same_select_twice_is_identical() {
    let session = SessionController::new().expect("session");
    let query = "select name, gravity from planets";
    let first = interpret(query, session.table()).expect("first");
    let second = interpret(query, session.table()).expect("second");
    assert_eq!(first, second);
}
