use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// One column per spiral: a heading and the topics that may fill its slots.
const TRACKS: [(&str, &[&str]); 6] = [
    ("發音", &["母音", "子音", "聲調", "連音", "重音", "語調", "節奏", "弱讀"]),
    ("詞彙", &["數字", "顏色", "家庭", "食物", "交通", "天氣", "職業", "情緒"]),
    ("語法", &["現在式", "過去式", "未來式", "比較級", "被動", "條件句", "關係子句", "假設"]),
    ("聽力", &["問候", "購物", "問路", "電話", "新聞", "訪談", "講座", "電影"]),
    ("口說", &["自我介紹", "點餐", "描述", "討論", "簡報", "辯論", "即興", "面試"]),
    ("寫作", &["句子", "段落", "日記", "書信", "摘要", "報告", "評論", "論文"]),
];

const ROWS: usize = 12;

/// Chance that a slot is left blank.
const BLANK_RATE: f64 = 0.35;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Column-major label cells; `None` marks a blank slot.
fn generate_columns(rng: &mut SimpleRng) -> Vec<Vec<Option<String>>> {
    TRACKS
        .iter()
        .map(|(_, topics)| {
            let mut next_topic = topics.iter().cycle();
            (0..ROWS)
                .map(|_| {
                    if rng.next_f64() < BLANK_RATE {
                        None
                    } else {
                        next_topic.next().map(|t| t.to_string())
                    }
                })
                .collect()
        })
        .collect()
}

fn write_csv(path: &str, columns: &[Vec<Option<String>>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer
        .write_record(TRACKS.iter().map(|(name, _)| *name))
        .context("writing CSV header")?;
    for row in 0..ROWS {
        let record: Vec<&str> = columns
            .iter()
            .map(|col| col[row].as_deref().unwrap_or(""))
            .collect();
        writer.write_record(&record).with_context(|| format!("writing CSV row {row}"))?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &str, columns: &[Vec<Option<String>>]) -> Result<()> {
    let schema = Arc::new(Schema::new(
        TRACKS
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|col| Arc::new(StringArray::from(col.clone())) as ArrayRef)
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("creating RecordBatch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let columns = generate_columns(&mut rng);

    write_csv("spiral_data.csv", &columns)?;
    write_parquet("spiral_data.parquet", &columns)?;

    let labels: usize = columns.iter().flatten().filter(|c| c.is_some()).count();
    println!(
        "Wrote {} columns × {ROWS} rows ({labels} labels) to spiral_data.csv and spiral_data.parquet",
        columns.len()
    );
    Ok(())
}
