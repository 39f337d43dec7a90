// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::sync::Arc;

use async_trait::async_trait;
use opera_bridge::registry::{TokenRegistry, MAX_REGISTRY_TOKENS};
use opera_bridge::types::abi::{self, Word};
use opera_bridge::types::account::TokenKind;
use opera_bridge::types::signatures::fmint;
use opera_bridge::types::{BigUint, ContractAddress};
use opera_bridge::{Bridge, Config, Error};

use crate::utils::*;

fn config(tokens: Option<Vec<ContractAddress>>) -> Config {
    let mut config = Config::default();
    config.staking.sfc = SFC;
    config.defi.address_provider = PROVIDER;
    config.defi.minter = Some(MINTER);
    config.defi.price_oracle = Some(ORACLE);
    config.defi.tokens = tokens;
    config
}

fn scripted_totals(node: &MockNode) {
    node.reply_uint(MINTER, fmint::COLLATERAL_VALUE_OF, &tokens(1_500));
    node.reply_uint(MINTER, fmint::DEBT_VALUE_OF, &tokens(400));
}

#[derive(Debug)]
struct UnavailableRegistry;

#[async_trait]
impl TokenRegistry for UnavailableRegistry {
    async fn tokens(&self) -> Result<Vec<ContractAddress>, Error> {
        Err(Error::Registry("registry offline".into()))
    }
}

#[tokio::test]
async fn valuation_with_configured_tokens() -> Result<(), Error> {
    init_tracing();
    let node = Arc::new(MockNode::new());
    scripted_totals(&node);
    let config = config(Some(vec![TOKEN_A, TOKEN_B]));
    let bridge = Bridge::with_caller(&config, node.clone());

    let valuation = bridge.account_valuation(&OWNER).await?;
    assert_eq!(valuation.owner, OWNER);
    assert_eq!(valuation.collateral_tokens, vec![TOKEN_A, TOKEN_B]);
    assert_eq!(valuation.debt_tokens, valuation.collateral_tokens);
    assert_eq!(valuation.collateral_value.raw(), &tokens(1_500));
    assert_eq!(valuation.debt_value.raw(), &tokens(400));

    // Only the joined values are read, never per-token balances.
    assert_eq!(node.calls().len(), 2);
    Ok(())
}

#[tokio::test]
async fn valuation_serializes_for_clients() -> Result<(), Error> {
    let node = Arc::new(MockNode::new());
    node.reply_uint(MINTER, fmint::COLLATERAL_VALUE_OF, &BigUint::from(255u64));
    node.reply_uint(MINTER, fmint::DEBT_VALUE_OF, &BigUint::default());
    let bridge = Bridge::with_caller(&config(Some(vec![TOKEN_A])), node);

    let valuation = bridge.account_valuation(&OWNER).await?;
    let json = serde_json::to_value(&valuation)
        .expect("valuation should serialize");
    assert_eq!(json["collateralValue"], "0xff");
    assert_eq!(json["debtValue"], "0x0");
    assert_eq!(json["debtTokens"][0], TOKEN_A.to_string());
    Ok(())
}

#[tokio::test]
async fn registry_failure_aborts_valuation() {
    let node = Arc::new(MockNode::new());
    scripted_totals(&node);
    let bridge = Bridge::with_caller(&config(None), node.clone())
        .with_registry(Arc::new(UnavailableRegistry));

    let result = bridge.account_valuation(&OWNER).await;
    assert!(matches!(result, Err(Error::Registry(_))));
    assert!(node.calls().is_empty());
}

#[tokio::test]
async fn totals_failure_aborts_valuation() {
    let node = Arc::new(MockNode::new());
    node.reply_uint(MINTER, fmint::COLLATERAL_VALUE_OF, &tokens(1_500));
    let bridge =
        Bridge::with_caller(&config(Some(vec![TOKEN_A])), node.clone());

    let result = bridge.account_valuation(&OWNER).await;
    assert!(matches!(result, Err(Error::Transport(_))));
    assert_eq!(node.calls_to(&MINTER, fmint::DEBT_VALUE_OF), 1);
}

#[tokio::test]
async fn tokens_are_enumerated_from_registry() -> Result<(), Error> {
    init_tracing();
    let node = Arc::new(MockNode::new());
    scripted_totals(&node);
    node.reply_address(PROVIDER, fmint::GET_TOKEN_REGISTRY, &REGISTRY);
    node.reply_uint(REGISTRY, fmint::TOKENS_COUNT, &BigUint::from(2u64));
    for (index, token) in [TOKEN_A, TOKEN_B].iter().enumerate() {
        let payload =
            abi::encode_call(fmint::TOKENS, &[Word::from(index as u64)]);
        node.reply_to_payload(REGISTRY, payload, address_word(token));
    }
    let bridge = Bridge::with_caller(&config(None), node.clone());

    let listed = bridge.registry().tokens().await?;
    assert_eq!(listed, vec![TOKEN_A, TOKEN_B]);

    let valuation = bridge.account_valuation(&OWNER).await?;
    assert_eq!(valuation.collateral_tokens, vec![TOKEN_A, TOKEN_B]);
    assert_eq!(node.calls_to(&PROVIDER, fmint::GET_TOKEN_REGISTRY), 1);
    assert_eq!(node.calls_to(&REGISTRY, fmint::TOKENS), 4);
    Ok(())
}

#[tokio::test]
async fn empty_registry_is_a_valid_answer() -> Result<(), Error> {
    let node = Arc::new(MockNode::new());
    scripted_totals(&node);
    node.reply_address(PROVIDER, fmint::GET_TOKEN_REGISTRY, &REGISTRY);
    node.reply_uint(REGISTRY, fmint::TOKENS_COUNT, &BigUint::default());
    let bridge = Bridge::with_caller(&config(None), node);

    let valuation = bridge.account_valuation(&OWNER).await?;
    assert!(valuation.collateral_tokens.is_empty());
    assert!(valuation.debt_tokens.is_empty());
    Ok(())
}

#[tokio::test]
async fn single_token_value_through_bridge() -> Result<(), Error> {
    let node = Arc::new(MockNode::new());
    node.reply_uint(MINTER, fmint::COLLATERAL_BALANCE, &tokens(10));
    node.reply_uint(ORACLE, fmint::GET_PRICE, &BigUint::from(3u64));
    let bridge = Bridge::with_caller(&config(Some(vec![TOKEN_A])), node);

    let value = bridge
        .token_value(&OWNER, &TOKEN_A, TokenKind::Collateral)
        .await?;
    assert_eq!(value.raw(), &(tokens(10) * BigUint::from(3u64)));
    Ok(())
}

#[tokio::test]
async fn oversized_registry_is_refused() {
    let node = Arc::new(MockNode::new());
    scripted_totals(&node);
    node.reply_address(PROVIDER, fmint::GET_TOKEN_REGISTRY, &REGISTRY);
    let count = BigUint::from(MAX_REGISTRY_TOKENS + 1);
    node.reply_uint(REGISTRY, fmint::TOKENS_COUNT, &count);
    let bridge = Bridge::with_caller(&config(None), node.clone());

    let result = bridge.account_valuation(&OWNER).await;
    assert!(matches!(result, Err(Error::Registry(_))));
    assert_eq!(node.calls_to(&REGISTRY, fmint::TOKENS), 0);

    node.reply(REGISTRY, fmint::TOKENS_COUNT, vec![0xff; 32]);
    let result = bridge.registry().tokens().await;
    assert!(matches!(result, Err(Error::Registry(_))));
    assert_eq!(node.calls_to(&REGISTRY, fmint::TOKENS), 0);
}
