mod common;

use common::{expect_sent, reply, setup};
use futures::StreamExt;
use scalerpc_caller::error::RpcCallerError;
use scalerpc_sections::{BlockHash, BlockNumber};

fn header_json(number: &str) -> String {
    format!(
        r#"{{"parentHash":"0x{}","number":"{number}","stateRoot":"0x{}","extrinsicsRoot":"0x{}","digest":{{"logs":[]}}}}"#,
        "11".repeat(32),
        "22".repeat(32),
        "33".repeat(32),
    )
}

#[tokio::test]
async fn test_genesis_hash_requests_block_zero() {
    let (sections, mut sent) = setup();
    let chain = sections.chain();

    let call = tokio::spawn(async move { chain.genesis_hash().await });

    expect_sent(
        &mut sent,
        r#"{"id":1,"method":"chain_getBlockHash","params":[0]}"#,
    )
    .await;
    reply(
        &sections,
        &format!(r#"{{"id":1,"result":"0x{}"}}"#, "aa".repeat(32)),
    );

    assert_eq!(call.await.unwrap().unwrap(), Some(BlockHash([0xaa; 32])));
}

#[tokio::test]
async fn test_unknown_height_and_best_block() {
    let (sections, mut sent) = setup();

    let unknown = tokio::spawn({
        let chain = sections.chain();
        async move { chain.get_block_hash(Some(BlockNumber(1_000_000))).await }
    });
    sent.next().await.unwrap();
    reply(&sections, r#"{"id":1,"result":null}"#);
    assert_eq!(unknown.await.unwrap().unwrap(), None);

    let best = tokio::spawn({
        let chain = sections.chain();
        async move { chain.get_block_hash(None).await }
    });
    expect_sent(
        &mut sent,
        r#"{"id":2,"method":"chain_getBlockHash","params":[]}"#,
    )
    .await;
    reply(
        &sections,
        &format!(r#"{{"id":2,"result":"0x{}"}}"#, "bb".repeat(32)),
    );
    assert_eq!(best.await.unwrap().unwrap(), Some(BlockHash([0xbb; 32])));
}

#[tokio::test]
async fn test_short_hash_is_a_decode_error() {
    let (sections, mut sent) = setup();
    let chain = sections.chain();

    let call = tokio::spawn(async move { chain.get_finalized_head().await });
    sent.next().await.unwrap();
    reply(&sections, r#"{"id":1,"result":"0x0102"}"#);

    assert!(matches!(
        call.await.unwrap(),
        Err(RpcCallerError::Decode(_))
    ));
}

#[tokio::test]
async fn test_get_header_parses_hex_number() {
    let (sections, mut sent) = setup();
    let chain = sections.chain();
    let hash = BlockHash([0x44; 32]);

    let call = tokio::spawn(async move { chain.get_header(Some(hash)).await });
    expect_sent(
        &mut sent,
        &format!(
            r#"{{"id":1,"method":"chain_getHeader","params":["0x{}"]}}"#,
            "44".repeat(32)
        ),
    )
    .await;
    reply(
        &sections,
        &format!(r#"{{"id":1,"result":{}}}"#, header_json("0x1a")),
    );

    let header = call.await.unwrap().unwrap().unwrap();
    assert_eq!(header.number, BlockNumber(26));
    assert_eq!(header.parent_hash, BlockHash([0x11; 32]));
    assert_eq!(header.extrinsics_root, BlockHash([0x33; 32]));
}

#[tokio::test]
async fn test_new_heads_stream_and_drop_unsubscribes() {
    let (sections, mut sent) = setup();

    let open = tokio::spawn({
        let chain = sections.chain();
        async move { chain.subscribe_new_heads().await }
    });
    expect_sent(
        &mut sent,
        r#"{"id":1,"method":"chain_subscribeNewHeads","params":[]}"#,
    )
    .await;
    reply(&sections, r#"{"id":1,"result":"abc"}"#);
    let mut heads = open.await.unwrap().unwrap();

    for number in ["0x1", "0x2"] {
        reply(
            &sections,
            &format!(
                r#"{{"method":"chain_newHead","params":{{"subscription":"abc","result":{}}}}}"#,
                header_json(number)
            ),
        );
    }
    assert_eq!(heads.next().await.unwrap().unwrap().number, BlockNumber(1));
    assert_eq!(heads.next().await.unwrap().unwrap().number, BlockNumber(2));

    drop(heads);

    expect_sent(
        &mut sent,
        r#"{"id":2,"method":"chain_unsubscribeNewHeads","params":["abc"]}"#,
    )
    .await;
}
