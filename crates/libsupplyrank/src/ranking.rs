use itertools::Itertools;

use crate::{
  model::{Ranked, ScoreProfile},
  scoring::{self, Scored},
};

/// Order candidates by descending score, keeping at most `limit` of them.
///
/// The sort is stable: candidates with equal scores keep their table order.
pub fn top_by_score(candidates: Vec<Scored<'_>>, limit: Option<usize>) -> Vec<Ranked> {
  candidates
    .into_iter()
    .sorted_by(|lhs, rhs| lhs.score.total_cmp(&rhs.score).reverse())
    .take(limit.unwrap_or(usize::MAX))
    .map(|scored| Ranked {
      name: scored.record.name.clone(),
      score: scored.score,
    })
    .collect()
}

/// Order candidates by ascending distance to a target profile, keeping at most
/// `limit` of them.
///
/// The target revenue is normalized against the maximum revenue of the
/// candidates themselves, matching how their own normalized revenue was built.
pub fn closest(candidates: Vec<Scored<'_>>, target: &ScoreProfile, limit: usize) -> Vec<Ranked> {
  let max = scoring::max_revenue(candidates.iter().map(|scored| scored.record));
  let target_normalized_revenue = scoring::normalize_revenue(Some(target.revenue), max);

  candidates
    .into_iter()
    .map(|scored| (scoring::similarity(&scored, target, target_normalized_revenue), scored))
    .sorted_by(|(lhs, _), (rhs, _)| lhs.total_cmp(rhs))
    .take(limit)
    .map(|(similarity, scored)| Ranked {
      name: scored.record.name.clone(),
      score: similarity,
    })
    .collect()
}
