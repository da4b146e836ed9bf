use num::Num;
use serde::ser::SerializeStruct;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::ZeroSpVec;

impl<N> Serialize for ZeroSpVec<N>
where
    N: Num + Serialize + Copy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // シリアライズするフィールドは len, entries とする
        let mut state = serializer.serialize_struct("ZeroSpVec", 2)?;
        state.serialize_field("len", &(self.len() as u64))?;
        let entries: Vec<(u32, N)> = self
            .as_ind_slice()
            .iter()
            .copied()
            .zip(self.as_val_slice().iter().copied())
            .collect();
        state.serialize_field("entries", &entries)?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for ZeroSpVec<N>
where
    N: Num + Deserialize<'de> + Copy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // 内部表現用の一時構造体
        #[derive(Deserialize)]
        struct ZeroSpVecData<N> {
            len: u64,
            entries: Vec<(u32, N)>,
        }

        let data = ZeroSpVecData::deserialize(deserializer)?;
        let len = usize::try_from(data.len).map_err(de::Error::custom)?;
        ZeroSpVec::try_from_sorted(len, data.entries).map_err(de::Error::custom)
    }
}
