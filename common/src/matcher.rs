//! シート名のあいまい照合
//!
//! 編集距離ベースの類似度（0〜100の整数）で候補シート名を順位付けし、
//! 最も近いものを返す。最低スコアの閾値は設けない。
//!
//! スコアは次の最大値:
//! - 単純比率
//! - トークン整列比率・トークン集合比率（×0.95）
//! - 長さ比が1.5以上なら部分一致版（×0.9、長さ比8以上は×0.6）

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;

/// 照合結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetMatch {
    pub name: String,
    pub score: u8,
    /// 候補一覧での位置
    pub index: usize,
}

/// 最も近いシート名を返す
///
/// 同点の場合は候補一覧で先に現れたものを採用する。
pub fn match_sheet<S: AsRef<str>>(target: &str, candidates: &[S]) -> Result<SheetMatch> {
    let mut best: Option<SheetMatch> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let name = candidate.as_ref();
        let score = weighted_ratio(target, name);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(SheetMatch {
                name: name.to_string(),
                score,
                index,
            });
        }
    }

    best.ok_or(Error::NoCandidates)
}

/// 全候補をスコア降順に並べる（同点は元の順序）
pub fn rank_sheets<S: AsRef<str>>(target: &str, candidates: &[S]) -> Vec<SheetMatch> {
    let mut ranked: Vec<SheetMatch> = candidates
        .iter()
        .enumerate()
        .map(|(index, c)| SheetMatch {
            name: c.as_ref().to_string(),
            score: weighted_ratio(target, c.as_ref()),
            index,
        })
        .collect();

    // 安定ソート
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// 照合前の正規化（小文字化・英数字以外を空白に）
pub fn preprocess(s: &str) -> String {
    lazy_static! {
        static ref NON_WORD_RE: Regex = Regex::new(r"\W+").unwrap();
    }

    NON_WORD_RE
        .replace_all(&s.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// 類似度スコア（0〜100）
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let p1 = preprocess(a);
    let p2 = preprocess(b);

    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let base = f64::from(ratio(&p1, &p2));

    let len1 = p1.chars().count() as f64;
    let len2 = p2.chars().count() as f64;
    let len_ratio = len1.max(len2) / len1.min(len2);

    let best = if len_ratio >= 1.5 {
        let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
        let partial = f64::from(partial_ratio(&p1, &p2)) * partial_scale;
        let ptsor = f64::from(token_sort_ratio(&p1, &p2, true)) * UNBASE_SCALE * partial_scale;
        let ptser = f64::from(token_set_ratio(&p1, &p2, true)) * UNBASE_SCALE * partial_scale;
        base.max(partial).max(ptsor).max(ptser)
    } else {
        let tsor = f64::from(token_sort_ratio(&p1, &p2, false)) * UNBASE_SCALE;
        let tser = f64::from(token_set_ratio(&p1, &p2, false)) * UNBASE_SCALE;
        base.max(tsor).max(tser)
    };

    best.round().clamp(0.0, 100.0) as u8
}

/// 単純比率: (長さの和 - 編集距離) / 長さの和
///
/// 置換コストは2（挿入+削除と同じ）。
fn ratio(a: &str, b: &str) -> u8 {
    let len_sum = a.chars().count() + b.chars().count();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let distance = levenshtein_distance(a, b, 2);
    let r = (len_sum - distance) as f64 / len_sum as f64;
    (r * 100.0).round() as u8
}

/// 短い方の文字列を長い方の各位置に重ねた最大比率
fn partial_ratio(a: &str, b: &str) -> u8 {
    let (shorter, longer): (Vec<char>, Vec<char>) = if a.chars().count() <= b.chars().count() {
        (a.chars().collect(), b.chars().collect())
    } else {
        (b.chars().collect(), a.chars().collect())
    };

    if shorter.is_empty() {
        return 0;
    }

    let short: String = shorter.iter().collect();
    let mut best = 0;
    for start in 0..=(longer.len() - shorter.len()) {
        let window: String = longer[start..start + shorter.len()].iter().collect();
        let r = ratio(&short, &window);
        if r > best {
            best = r;
        }
        if best == 100 {
            break;
        }
    }
    best
}

fn compare(a: &str, b: &str, partial: bool) -> u8 {
    if partial {
        partial_ratio(a, b)
    } else {
        ratio(a, b)
    }
}

/// トークンを整列して比較
fn token_sort_ratio(a: &str, b: &str, partial: bool) -> u8 {
    let sorted = |s: &str| {
        let mut tokens: Vec<&str> = s.split_whitespace().collect();
        tokens.sort_unstable();
        tokens.join(" ")
    };
    compare(&sorted(a), &sorted(b), partial)
}

/// 共通トークンと差分トークンに分けて比較
fn token_set_ratio(a: &str, b: &str, partial: bool) -> u8 {
    let tokens1: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens2: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |set: Vec<&str>| set.join(" ");
    let intersection = join(tokens1.intersection(&tokens2).copied().collect());
    let diff1to2 = join(tokens1.difference(&tokens2).copied().collect());
    let diff2to1 = join(tokens2.difference(&tokens1).copied().collect());

    let combined_1to2 = format!("{} {}", intersection, diff1to2).trim().to_string();
    let combined_2to1 = format!("{} {}", intersection, diff2to1).trim().to_string();

    [
        compare(&intersection, &combined_1to2, partial),
        compare(&intersection, &combined_2to1, partial),
        compare(&combined_1to2, &combined_2to1, partial),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

/// レーベンシュタイン距離を計算（置換コスト指定）
fn levenshtein_distance(a: &str, b: &str, substitution_cost: usize) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { substitution_cost };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
