//! The shipped template catalog.
//!
//! Outcome index convention: for every template, `defaults.outcomes[i]` is
//! outcome index `i`, and every extraction rule of that template emits the
//! same index for the same real-world result. Rules emit `{}` when the source
//! cannot resolve yet.

use super::types::{
    DataSourceTemplate, HttpMethod, MarketDefaults, OutcomeDefault, ResultShape, Template,
    VariableSpec,
};
use std::collections::BTreeMap;

/// All builtin templates, in display order.
pub fn templates() -> Vec<Template> {
    vec![
        flr_price(),
        crypto_price(),
        tvl_goal(),
        football_match_winner(),
        esports_match_winner(),
    ]
}

fn source(name: &str, endpoint: &str, extraction_rule: &str) -> DataSourceTemplate {
    DataSourceTemplate {
        name: name.to_string(),
        method: HttpMethod::Get,
        endpoint: endpoint.to_string(),
        query_params: None,
        headers: None,
        body: None,
        extraction_rule: extraction_rule.to_string(),
        result_shape: ResultShape::outcome_index(),
    }
}

fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn with_query(mut source: DataSourceTemplate, params: &[(&str, &str)]) -> DataSourceTemplate {
    source.query_params = Some(pairs(params));
    source
}

fn yes_no() -> Vec<OutcomeDefault> {
    vec![OutcomeDefault::new("Yes", 0), OutcomeDefault::new("No", 1)]
}

fn comparison_variable() -> VariableSpec {
    VariableSpec::select(&[("above", "Above"), ("below", "Below")])
        .label("Direction")
        .default_value("above")
}

fn attestation_variable(label: &str) -> VariableSpec {
    VariableSpec::datetime().required().label(label)
}

fn flr_price() -> Template {
    let variables = BTreeMap::from([
        (
            "price".to_string(),
            VariableSpec::number()
                .required()
                .decimals(5)
                .label("Target price (USD)"),
        ),
        ("comparisonType".to_string(), comparison_variable()),
        (
            "attestationTime".to_string(),
            attestation_variable("Price checked at"),
        ),
    ]);

    Template {
        id: "flr-price".to_string(),
        name: "FLR Price".to_string(),
        description: "Will FLR trade above or below a target price at a given time?".to_string(),
        category: "crypto".to_string(),
        image: "templates/flr-price.png".to_string(),
        variables,
        question: "Will FLR be {{comparisonType}} ${{priceFormatted}} on {{attestationTime}} UTC?"
            .to_string(),
        resolution_definition: "This market resolves to \"Yes\" if the FLR/USD price at \
            {{attestationTime}} UTC (unix {{attestationTimeUnix}}) is {{comparisonType}} \
            ${{priceFormatted}}, and to \"No\" otherwise. \"Above\" means greater than or equal \
            to the target; \"below\" means strictly less than the target. The CoinGecko price \
            is authoritative; Binance FLR/USDT and CryptoCompare minute closes corroborate it."
            .to_string(),
        data_sources: vec![
            with_query(
                source(
                    "coingecko",
                    "{{apiProxyPrefix}}/coingecko/api/v3/coins/flare-networks/market_chart/range",
                    r#"([.prices[] | select(.[0] <= {{attestationTimeUnixMs}})] | last) as $p | if $p == null then {} else {outcomeIdx: (if $p[1] {{comparisonOp}} {{price}} then 0 else 1 end)} end"#,
                ),
                &[
                    ("vs_currency", "usd"),
                    ("from", "{{attestationWindowStartUnix}}"),
                    ("to", "{{attestationTimeUnix}}"),
                ],
            ),
            with_query(
                source(
                    "binance",
                    "{{apiProxyPrefix}}/binance/api/v3/klines",
                    r#"if length == 0 then {} else {outcomeIdx: (if (.[0][4] | tonumber) {{comparisonOp}} {{price}} then 0 else 1 end)} end"#,
                ),
                &[
                    ("symbol", "FLRUSDT"),
                    ("interval", "1m"),
                    ("startTime", "{{attestationTimeUnixMs}}"),
                    ("limit", "1"),
                ],
            ),
            with_query(
                source(
                    "cryptocompare",
                    "{{apiProxyPrefix}}/cryptocompare/data/v2/histominute",
                    r#"(.Data.Data | last) as $c | if $c == null then {} else {outcomeIdx: (if $c.close {{comparisonOp}} {{price}} then 0 else 1 end)} end"#,
                ),
                &[
                    ("fsym", "FLR"),
                    ("tsym", "USD"),
                    ("limit", "1"),
                    ("toTs", "{{attestationTimeUnix}}"),
                ],
            ),
        ],
        defaults: MarketDefaults {
            outcomes: yes_no(),
            consensus_threshold_pct: 66,
            collateral_token: "USDT0".to_string(),
            market_cap_pct: 5,
        },
    }
}

fn crypto_price() -> Template {
    let variables = BTreeMap::from([
        (
            "coinId".to_string(),
            VariableSpec::entity("coingecko-coin")
                .required()
                .label("CoinGecko coin"),
        ),
        (
            "symbol".to_string(),
            VariableSpec::text().required().label("Ticker symbol"),
        ),
        (
            "price".to_string(),
            VariableSpec::number()
                .required()
                .decimals(2)
                .label("Target price (USD)"),
        ),
        ("comparisonType".to_string(), comparison_variable()),
        (
            "attestationTime".to_string(),
            attestation_variable("Price checked at"),
        ),
    ]);

    Template {
        id: "crypto-price".to_string(),
        name: "Crypto Price".to_string(),
        description: "Will a listed cryptocurrency trade above or below a target price at a given time?"
            .to_string(),
        category: "crypto".to_string(),
        image: "templates/crypto-price.png".to_string(),
        variables,
        question: "Will {{symbol}} be {{comparisonType}} ${{priceFormatted}} on {{attestationTime}} UTC?"
            .to_string(),
        resolution_definition: "This market resolves to \"Yes\" if the {{symbol}}/USD price at \
            {{attestationTime}} UTC is {{comparisonType}} ${{priceFormatted}}, and to \"No\" \
            otherwise. \"Above\" means greater than or equal to the target; \"below\" means \
            strictly less than the target. CoinGecko ({{coinId}}) is authoritative; the \
            CryptoCompare minute close corroborates it."
            .to_string(),
        data_sources: vec![
            with_query(
                source(
                    "coingecko",
                    "{{apiProxyPrefix}}/coingecko/api/v3/coins/{{coinId}}/market_chart/range",
                    r#"([.prices[] | select(.[0] <= {{attestationTimeUnixMs}})] | last) as $p | if $p == null then {} else {outcomeIdx: (if $p[1] {{comparisonOp}} {{price}} then 0 else 1 end)} end"#,
                ),
                &[
                    ("vs_currency", "usd"),
                    ("from", "{{attestationWindowStartUnix}}"),
                    ("to", "{{attestationTimeUnix}}"),
                ],
            ),
            with_query(
                source(
                    "cryptocompare",
                    "{{apiProxyPrefix}}/cryptocompare/data/v2/histominute",
                    r#"(.Data.Data | last) as $c | if $c == null then {} else {outcomeIdx: (if $c.close {{comparisonOp}} {{price}} then 0 else 1 end)} end"#,
                ),
                &[
                    ("fsym", "{{symbol}}"),
                    ("tsym", "USD"),
                    ("limit", "1"),
                    ("toTs", "{{attestationTimeUnix}}"),
                ],
            ),
        ],
        defaults: MarketDefaults {
            outcomes: yes_no(),
            consensus_threshold_pct: 100,
            collateral_token: "USDT0".to_string(),
            market_cap_pct: 5,
        },
    }
}

fn tvl_goal() -> Template {
    let variables = BTreeMap::from([
        (
            "protocol".to_string(),
            VariableSpec::entity("defillama-protocol")
                .required()
                .label("DefiLlama protocol slug"),
        ),
        (
            "protocolName".to_string(),
            VariableSpec::text().required().label("Protocol name"),
        ),
        (
            "goal".to_string(),
            VariableSpec::number()
                .required()
                .decimals(0)
                .label("TVL goal (USD)"),
        ),
        (
            "attestationTime".to_string(),
            attestation_variable("Deadline"),
        ),
    ]);

    Template {
        id: "tvl-goal".to_string(),
        name: "Protocol TVL Goal".to_string(),
        description: "Will a DeFi protocol's total value locked reach a goal by a deadline?"
            .to_string(),
        category: "defi".to_string(),
        image: "templates/tvl-goal.png".to_string(),
        variables,
        question: "Will {{protocolName}} TVL reach ${{goalFormatted}} by {{attestationTimeDate}}?"
            .to_string(),
        resolution_definition: "This market resolves to \"Yes\" if the total value locked of \
            {{protocolName}} as reported by DefiLlama is at least ${{goalFormatted}} at \
            {{attestationTime}} UTC, and to \"No\" otherwise. The daily TVL series is \
            authoritative; the current TVL endpoint corroborates it."
            .to_string(),
        data_sources: vec![
            source(
                "defillama-history",
                "{{apiProxyPrefix}}/defillama/protocol/{{protocol}}",
                r#"([.tvl[] | select(.date <= {{attestationTimeUnix}})] | last) as $t | if $t == null then {} else {outcomeIdx: (if $t.totalLiquidityUSD >= {{goal}} then 0 else 1 end)} end"#,
            ),
            source(
                "defillama-current",
                "{{apiProxyPrefix}}/defillama/tvl/{{protocol}}",
                r#"if type == "number" then {outcomeIdx: (if . >= {{goal}} then 0 else 1 end)} else {} end"#,
            ),
        ],
        defaults: MarketDefaults {
            outcomes: yes_no(),
            consensus_threshold_pct: 100,
            collateral_token: "USDT0".to_string(),
            market_cap_pct: 10,
        },
    }
}

fn football_match_winner() -> Template {
    let variables = BTreeMap::from([
        (
            "homeTeam".to_string(),
            VariableSpec::text().required().label("Home team"),
        ),
        (
            "awayTeam".to_string(),
            VariableSpec::text().required().label("Away team"),
        ),
        (
            "matchId".to_string(),
            VariableSpec::entity("api-football-fixture")
                .required()
                .label("API-Football fixture id"),
        ),
        (
            "footballDataMatchId".to_string(),
            VariableSpec::entity("football-data-match")
                .required()
                .label("football-data.org match id"),
        ),
        (
            "attestationTime".to_string(),
            attestation_variable("Kick-off"),
        ),
    ]);

    let mut football_data = source(
        "football-data",
        "{{apiProxyPrefix}}/football-data/v4/matches/{{footballDataMatchId}}",
        r#"if .status != "FINISHED" then {} elif .score.winner == "HOME_TEAM" then {outcomeIdx: 0} elif .score.winner == "DRAW" then {outcomeIdx: 1} elif .score.winner == "AWAY_TEAM" then {outcomeIdx: 2} else {} end"#,
    );
    football_data.headers = Some(pairs(&[("Accept", "application/json")]));

    Template {
        id: "football-match-winner".to_string(),
        name: "Football Match Winner".to_string(),
        description: "Who will win a football match: home side, away side, or a draw?"
            .to_string(),
        category: "sports".to_string(),
        image: "templates/football-match-winner.png".to_string(),
        variables,
        question: "Who will win {{homeTeam}} vs {{awayTeam}} on {{matchDateFormatted}} UTC?"
            .to_string(),
        resolution_definition: "This market resolves to \"{{homeTeam}}\" if {{homeTeam}} wins, \
            \"Draw\" if the match ends level, and \"{{awayTeam}}\" if {{awayTeam}} wins. Extra \
            time and penalty shoot-outs count when the competition uses them. The match kicks \
            off at {{matchDateFormatted}} UTC. API-Football fixture {{matchId}} is \
            authoritative; football-data.org corroborates it."
            .to_string(),
        data_sources: vec![
            with_query(
                source(
                    "api-football",
                    "{{apiProxyPrefix}}/api-football/fixtures",
                    r#".response[0] as $f | if $f == null then {} elif ($f.fixture.status.short | IN("FT", "AET", "PEN") | not) then {} elif $f.teams.home.winner == true then {outcomeIdx: 0} elif $f.teams.away.winner == true then {outcomeIdx: 2} else {outcomeIdx: 1} end"#,
                ),
                &[("id", "{{matchId}}")],
            ),
            football_data,
        ],
        defaults: MarketDefaults {
            outcomes: vec![
                OutcomeDefault::new("Home", 0),
                OutcomeDefault::new("Draw", 1),
                OutcomeDefault::new("Away", 2),
            ],
            consensus_threshold_pct: 100,
            collateral_token: "USDT0".to_string(),
            market_cap_pct: 10,
        },
    }
}

fn esports_match_winner() -> Template {
    let variables = BTreeMap::from([
        (
            "teamA".to_string(),
            VariableSpec::text().required().label("Team A"),
        ),
        (
            "teamB".to_string(),
            VariableSpec::text().required().label("Team B"),
        ),
        (
            "matchId".to_string(),
            VariableSpec::entity("pandascore-match")
                .required()
                .label("PandaScore match id"),
        ),
        (
            "league".to_string(),
            VariableSpec::select(&[("lpl", "LPL"), ("ldl", "LDL")])
                .label("League")
                .default_value("lpl"),
        ),
        (
            "attestationTime".to_string(),
            attestation_variable("Scheduled start"),
        ),
    ]);

    let mut league_schedule = source(
        "league-schedule",
        "{{apiProxyPrefix}}/lpl/api/schedule",
        r#"([.data[] | select(.matchTime == "{{attestationTimeFormatted}}" and .teamA == "{{teamA}}" and .teamB == "{{teamB}}")] | first) as $m | if $m == null or $m.status != "finished" then {} elif $m.scoreA > $m.scoreB then {outcomeIdx: 0} elif $m.scoreB > $m.scoreA then {outcomeIdx: 1} else {} end"#,
    );
    league_schedule.method = HttpMethod::Post;
    league_schedule.query_params = Some(pairs(&[("league", "{{league}}")]));
    league_schedule.headers = Some(pairs(&[("Content-Type", "application/json")]));
    league_schedule.body = Some(serde_json::json!({ "page": 1, "pageSize": 100 }));

    Template {
        id: "esports-match-winner".to_string(),
        name: "Esports Match Winner".to_string(),
        description: "Which team will win a League of Legends match?".to_string(),
        category: "esports".to_string(),
        image: "templates/esports-match-winner.png".to_string(),
        variables,
        question: "Will {{teamA}} or {{teamB}} win their match on {{attestationTime}} UTC?"
            .to_string(),
        resolution_definition: "This market resolves to \"{{teamA}}\" if {{teamA}} wins the \
            series and to \"{{teamB}}\" if {{teamB}} wins it. The match is scheduled for \
            {{attestationTimeFormatted}} Beijing time ({{attestationTime}} UTC). PandaScore \
            match {{matchId}} is authoritative; the official league schedule corroborates it."
            .to_string(),
        data_sources: vec![
            with_query(
                source(
                    "pandascore",
                    "{{apiProxyPrefix}}/pandascore/lol/matches",
                    r#".[0] as $m | if $m == null or $m.status != "finished" or $m.winner == null then {} elif $m.winner.name == "{{teamA}}" then {outcomeIdx: 0} elif $m.winner.name == "{{teamB}}" then {outcomeIdx: 1} else {} end"#,
                ),
                &[("filter[id]", "{{matchId}}")],
            ),
            league_schedule,
        ],
        defaults: MarketDefaults {
            outcomes: vec![
                OutcomeDefault::new("Team A", 0),
                OutcomeDefault::new("Team B", 1),
            ],
            consensus_threshold_pct: 100,
            collateral_token: "USDT0".to_string(),
            market_cap_pct: 10,
        },
    }
}
