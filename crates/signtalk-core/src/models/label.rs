//! 수어 알파벳 레이블.
//!
//! 학습, 데이터셋 폴더 이름, 추론이 모두 같은 A–Z 열거 순서를 공유한다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 레이블 개수 (A–Z)
pub const LABEL_COUNT: usize = 26;

/// 열거 순서대로의 레이블 문자
pub const LABELS: [char; LABEL_COUNT] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// 알파벳 수어 레이블 (0 = 'A' … 25 = 'Z')
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct SignLabel(u8);

impl SignLabel {
    /// 열거 인덱스로 레이블 생성
    pub fn from_index(index: usize) -> Option<Self> {
        (index < LABEL_COUNT).then_some(Self(index as u8))
    }

    /// 문자로 레이블 생성 (대소문자 무시)
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        LABELS.iter().position(|&l| l == upper).map(|i| Self(i as u8))
    }

    /// 열거 인덱스
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 레이블 문자
    pub fn as_char(self) -> char {
        LABELS[self.index()]
    }

    /// 전체 레이블을 열거 순서로 순회
    pub fn all() -> impl Iterator<Item = SignLabel> {
        (0..LABEL_COUNT as u8).map(SignLabel)
    }
}

impl fmt::Display for SignLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for SignLabel {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or_else(|| format!("알 수 없는 레이블: {c}"))
    }
}

impl From<SignLabel> for char {
    fn from(label: SignLabel) -> Self {
        label.as_char()
    }
}
