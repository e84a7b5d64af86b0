mod common;

use common::{expect_sent, reply, setup};
use futures::StreamExt;
use scalerpc::scale::ScaleType;
use scalerpc_caller::RpcCallMethod;
use scalerpc_sections::state::GetStorage;
use scalerpc_sections::{AccountId, BlockHash, StorageKey, SystemHealth};

#[tokio::test]
async fn test_get_storage_decodes_through_registry() {
    let (sections, mut sent) = setup();
    let key = StorageKey(vec![0x26, 0xaa, 0x39, 0x4e]);

    let present = tokio::spawn({
        let state = sections.state();
        let key = key.clone();
        async move { state.get_storage::<u32>(key, None).await }
    });
    expect_sent(
        &mut sent,
        r#"{"id":1,"method":"state_getStorage","params":["0x26aa394e"]}"#,
    )
    .await;
    reply(&sections, r#"{"id":1,"result":"0x2a000000"}"#);
    assert_eq!(present.await.unwrap().unwrap(), Some(42));

    let absent = tokio::spawn({
        let state = sections.state();
        async move {
            state
                .get_storage::<u32>(key, Some(BlockHash([0x01; 32])))
                .await
        }
    });
    expect_sent(
        &mut sent,
        &format!(
            r#"{{"id":2,"method":"state_getStorage","params":["0x26aa394e","0x{}"]}}"#,
            "01".repeat(32)
        ),
    )
    .await;
    reply(&sections, r#"{"id":2,"result":null}"#);
    assert_eq!(absent.await.unwrap().unwrap(), None);
}

#[tokio::test]
async fn test_generic_storage_descriptor_validates_per_type() {
    let (sections, _sent) = setup();

    sections
        .dispatcher()
        .validate_operations(&[GetStorage::<Vec<u64>>::descriptor()])
        .unwrap();
    assert_eq!(
        GetStorage::<Vec<u64>>::result_keys(),
        vec![Vec::<u64>::type_key()]
    );
}

#[tokio::test]
async fn test_get_keys() {
    let (sections, mut sent) = setup();
    let state = sections.state();

    let call = tokio::spawn(async move { state.get_keys(StorageKey(vec![0xff])).await });
    expect_sent(
        &mut sent,
        r#"{"id":1,"method":"state_getKeys","params":["0xff"]}"#,
    )
    .await;
    reply(&sections, r#"{"id":1,"result":["0xff01","0xff02"]}"#);

    assert_eq!(
        call.await.unwrap().unwrap(),
        vec![StorageKey(vec![0xff, 0x01]), StorageKey(vec![0xff, 0x02])]
    );
}

#[tokio::test]
async fn test_system_queries() {
    let (sections, mut sent) = setup();

    let chain = tokio::spawn({
        let system = sections.system();
        async move { system.chain().await }
    });
    expect_sent(
        &mut sent,
        r#"{"id":1,"method":"system_chain","params":[]}"#,
    )
    .await;
    reply(&sections, r#"{"id":1,"result":"Development"}"#);
    assert_eq!(chain.await.unwrap().unwrap(), "Development");

    let health = tokio::spawn({
        let system = sections.system();
        async move { system.health().await }
    });
    sent.next().await.unwrap();
    reply(
        &sections,
        r#"{"id":2,"result":{"peers":3,"isSyncing":false,"shouldHavePeers":true}}"#,
    );
    assert_eq!(
        health.await.unwrap().unwrap(),
        SystemHealth {
            peers: 3,
            is_syncing: false,
            should_have_peers: true,
        }
    );
}

#[tokio::test]
async fn test_account_next_index() {
    let (sections, mut sent) = setup();
    let system = sections.system();

    let call = tokio::spawn(async move {
        system
            .account_next_index(AccountId([0x07; 32]))
            .await
    });
    expect_sent(
        &mut sent,
        &format!(
            r#"{{"id":1,"method":"system_accountNextIndex","params":["0x{}"]}}"#,
            "07".repeat(32)
        ),
    )
    .await;
    reply(&sections, r#"{"id":1,"result":12}"#);

    assert_eq!(call.await.unwrap().unwrap(), 12);
}
