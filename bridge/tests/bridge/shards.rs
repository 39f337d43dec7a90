// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use opera_bridge::rpc::TransportError;
use opera_bridge::shards::{ContractLocator, ShardResolver};
use opera_bridge::types::signatures::sfc;
use opera_bridge::types::ContractAddress;

use crate::utils::*;

const TTL: Duration = Duration::from_secs(60 * 60);

fn unreachable() -> TransportError {
    TransportError::Request("connection refused".into())
}

fn resolver(node: &Arc<MockNode>) -> Arc<ShardResolver> {
    Arc::new(ShardResolver::new(
        node.clone(),
        SFC,
        sfc::CONSTS_ADDRESS,
        TTL,
    ))
}

#[tokio::test(start_paused = true)]
async fn cached_within_ttl() {
    init_tracing();
    let node = Arc::new(MockNode::new());
    node.reply_address(SFC, sfc::CONSTS_ADDRESS, &SHARD);
    let resolver = resolver(&node);

    assert_eq!(resolver.cached().await, None);
    assert_eq!(resolver.resolve().await, SHARD);
    assert_eq!(resolver.cached().await, Some(SHARD));

    tokio::time::advance(TTL - Duration::from_millis(1)).await;
    assert_eq!(resolver.resolve().await, SHARD);
    assert_eq!(node.calls_to(&SFC, sfc::CONSTS_ADDRESS), 1);

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(resolver.resolve().await, SHARD);
    assert_eq!(node.calls_to(&SFC, sfc::CONSTS_ADDRESS), 2);
}

#[tokio::test(start_paused = true)]
async fn refresh_picks_up_new_address() {
    let node = Arc::new(MockNode::new());
    node.reply_address(SFC, sfc::CONSTS_ADDRESS, &SHARD);
    let resolver = resolver(&node);
    assert_eq!(resolver.resolve().await, SHARD);

    let moved = ContractAddress::new([0xbb; 20]);
    node.reply_address(SFC, sfc::CONSTS_ADDRESS, &moved);
    assert_eq!(resolver.resolve().await, SHARD);

    tokio::time::advance(TTL).await;
    assert_eq!(resolver.resolve().await, moved);
    assert_eq!(resolver.primary(), SFC);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_one_refresh() {
    init_tracing();
    let node =
        Arc::new(MockNode::new().with_latency(Duration::from_millis(50)));
    node.reply_address(SFC, sfc::CONSTS_ADDRESS, &SHARD);
    let resolver = resolver(&node);

    for round in 1..=2 {
        let lookups = (0..16).map(|_| {
            let resolver = resolver.clone();
            tokio::spawn(async move { resolver.resolve().await })
        });
        for address in join_all(lookups).await {
            assert_eq!(address.expect("lookup task panicked"), SHARD);
        }
        assert_eq!(node.calls_to(&SFC, sfc::CONSTS_ADDRESS), round);

        tokio::time::advance(TTL).await;
    }
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_serves_stale_address() {
    init_tracing();
    let node = Arc::new(MockNode::new());
    node.reply_address(SFC, sfc::CONSTS_ADDRESS, &SHARD);
    let resolver = resolver(&node);
    assert_eq!(resolver.resolve().await, SHARD);

    node.fail(SFC, sfc::CONSTS_ADDRESS, unreachable());
    tokio::time::advance(TTL).await;

    assert_eq!(resolver.resolve().await, SHARD);
    assert_eq!(node.calls_to(&SFC, sfc::CONSTS_ADDRESS), 2);

    // A failed attempt starts a new lifetime like a successful one.
    let moved = ContractAddress::new([0xbb; 20]);
    node.reply_address(SFC, sfc::CONSTS_ADDRESS, &moved);
    tokio::time::advance(TTL - Duration::from_millis(1)).await;
    assert_eq!(resolver.resolve().await, SHARD);
    assert_eq!(node.calls_to(&SFC, sfc::CONSTS_ADDRESS), 2);

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(resolver.resolve().await, moved);
    assert_eq!(resolver.resolve().await, moved);
    assert_eq!(node.calls_to(&SFC, sfc::CONSTS_ADDRESS), 3);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_one_failed_refresh() {
    init_tracing();
    let node =
        Arc::new(MockNode::new().with_latency(Duration::from_millis(50)));
    node.reply_address(SFC, sfc::CONSTS_ADDRESS, &SHARD);
    let resolver = resolver(&node);
    assert_eq!(resolver.resolve().await, SHARD);

    node.fail(SFC, sfc::CONSTS_ADDRESS, unreachable());
    tokio::time::advance(TTL).await;

    let lookups = (0..16).map(|_| {
        let resolver = resolver.clone();
        tokio::spawn(async move { resolver.resolve().await })
    });
    for address in join_all(lookups).await {
        assert_eq!(address.expect("lookup task panicked"), SHARD);
    }
    assert_eq!(node.calls_to(&SFC, sfc::CONSTS_ADDRESS), 2);
}

#[tokio::test(start_paused = true)]
async fn cold_failure_serves_zero_address() {
    let node = Arc::new(MockNode::new());
    node.fail(SFC, sfc::CONSTS_ADDRESS, unreachable());
    let resolver = resolver(&node);

    assert_eq!(resolver.resolve().await, ContractAddress::ZERO);
    assert_eq!(resolver.resolve().await, ContractAddress::ZERO);
    assert_eq!(resolver.cached().await, None);
    assert_eq!(node.calls_to(&SFC, sfc::CONSTS_ADDRESS), 1);
}

#[tokio::test(start_paused = true)]
async fn short_reply_is_a_failed_refresh() {
    let node = Arc::new(MockNode::new());
    node.reply(SFC, sfc::CONSTS_ADDRESS, vec![0xaa; 20]);
    let resolver = resolver(&node);

    assert_eq!(resolver.resolve().await, ContractAddress::ZERO);

    node.reply_address(SFC, sfc::CONSTS_ADDRESS, &SHARD);
    assert_eq!(resolver.resolve().await, ContractAddress::ZERO);

    tokio::time::advance(TTL).await;
    assert_eq!(resolver.resolve().await, SHARD);
    assert_eq!(resolver.cached().await, Some(SHARD));
}

#[tokio::test(start_paused = true)]
async fn oversized_ttl_is_capped() {
    let node = Arc::new(MockNode::new());
    node.reply_address(SFC, sfc::CONSTS_ADDRESS, &SHARD);
    let resolver = ShardResolver::new(
        node.clone(),
        SFC,
        sfc::CONSTS_ADDRESS,
        Duration::MAX,
    );

    assert_eq!(resolver.resolve().await, SHARD);
    tokio::time::advance(Duration::from_secs(10 * 365 * 24 * 60 * 60)).await;
    assert_eq!(resolver.resolve().await, SHARD);
    assert_eq!(node.calls_to(&SFC, sfc::CONSTS_ADDRESS), 1);
}

#[tokio::test]
async fn static_locator_never_calls() {
    let node = Arc::new(MockNode::new());
    let locator = ContractLocator::Static(MINTER);

    assert_eq!(locator.address().await, MINTER);
    assert!(node.calls().is_empty());
}

#[tokio::test]
async fn derived_locator_asks_provider() {
    let node = Arc::new(MockNode::new());
    let get_mint = opera_bridge::types::signatures::fmint::GET_FANTOM_MINT;
    node.reply_address(PROVIDER, get_mint, &MINTER);

    let caller: Arc<dyn opera_bridge::rpc::ViewCaller> = node.clone();
    let locator =
        ContractLocator::configured(None, &caller, PROVIDER, get_mint, TTL);
    assert_eq!(locator.address().await, MINTER);
    assert_eq!(locator.address().await, MINTER);
    assert_eq!(node.calls_to(&PROVIDER, get_mint), 1);

    let fixed = ContractLocator::configured(
        Some(ORACLE),
        &caller,
        PROVIDER,
        get_mint,
        TTL,
    );
    assert_eq!(fixed.address().await, ORACLE);
    assert_eq!(node.calls_to(&PROVIDER, get_mint), 1);
}
