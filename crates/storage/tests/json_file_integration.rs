use estude_core::model::{CardId, Outcome, Profile, ProgressRecord, TopicId, UserId};
use estude_core::scheduler::advance;
use estude_core::time::{fixed_now, fixed_today};
use storage::{JsonFileRepository, ProgressDocument, ProgressRepository};

fn reviewed_record(uid: &str) -> ProgressRecord {
    let mut record = ProgressRecord::new(Profile::new(UserId::new(uid), "Ana"));
    let today = fixed_today();

    let state = advance(None, Outcome::Correct, today);
    record.stats.card_states.insert(CardId::new("card-0"), state);
    record.stats.cards_lifetime = 1;
    record.stats.cards_today = 1;
    record.stats.streak = 1;
    record.stats.last_login = Some(today);
    record.stats.last_access = fixed_now();
    record.stats.activity.insert(today, 1);
    record
        .topics
        .entry(TopicId::new("bib"))
        .or_default()
        .record(Outcome::Correct);
    record
}

#[tokio::test]
async fn domain_record_survives_a_disk_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path()).unwrap();

    let record = reviewed_record("uid-disk");
    let doc = ProgressDocument::from_record(&record, fixed_now());
    repo.save(&record.profile.id, &doc).await.unwrap();

    let loaded = repo
        .load(&record.profile.id)
        .await
        .unwrap()
        .expect("document persisted");
    let restored = loaded.into_record(Profile::guest());

    assert_eq!(restored, record);
    assert_eq!(
        restored
            .stats
            .card_state(&CardId::new("card-0"))
            .unwrap()
            .repetitions,
        1
    );
}
