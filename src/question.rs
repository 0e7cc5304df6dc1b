// ============================================
// src/question.rs
// 出題ロジック (お題の選択と4択の選択肢づくり)
// ============================================

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{QuizError, QuizResult};
use crate::kana::Kana;

/// 正解以外の選択肢の数
pub const DISTRACTOR_COUNT: usize = 3;

/// 1問分のお題
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub target: &'static Kana,
    /// 正解を含む選択肢 (シャッフル済み)
    pub options: Vec<&'static str>,
    /// プール内での位置。次の出題で直前と同じ文字を避けるのに使う
    pub index: usize,
}

impl Question {
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.target.thai
    }
}

/// プールから次のお題を引く
///
/// プールに2文字以上あるときは `last_index` と同じ位置を引き直す。
/// 誤答候補は読み (`thai`) で重複を除いてから最大3つ選ぶので、読みの種類が
/// 4つ未満のプールでは選択肢もそのぶん少なくなる。
pub fn draw<R: Rng>(
    pool: &[&'static Kana],
    last_index: Option<usize>,
    rng: &mut R,
) -> QuizResult<Question> {
    if pool.is_empty() {
        return Err(QuizError::EmptyPool);
    }

    let mut index = rng.random_range(0..pool.len());
    while pool.len() > 1 && Some(index) == last_index {
        index = rng.random_range(0..pool.len());
    }
    let target = pool[index];

    let mut candidates: Vec<&'static str> = Vec::new();
    for kana in pool {
        if kana.thai != target.thai && !candidates.contains(&kana.thai) {
            candidates.push(kana.thai);
        }
    }

    // Fisher-Yates でシャッフルしてから先頭3つを使う
    candidates.shuffle(rng);
    candidates.truncate(DISTRACTOR_COUNT);

    let mut options = candidates;
    options.push(target.thai);
    options.shuffle(rng);

    Ok(Question {
        target,
        options,
        index,
    })
}
