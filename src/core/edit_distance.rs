/// Levenshtein 距離：插入、刪除、替換成本皆為 1
///
/// 以字元 (char) 為單位，使用完整的 (len(a)+1) x (len(b)+1) 動態規劃表。
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let substitution = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            table[i][j] = (table[i - 1][j - 1] + substitution)
                .min(table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1);
        }
    }

    table[a.len()][b.len()]
}

/// 片語超過 6 個字元（含中間空白）容許 3，否則 2
pub fn max_distance_for(phrase: &str) -> usize {
    if phrase.chars().count() > 6 {
        3
    } else {
        2
    }
}
