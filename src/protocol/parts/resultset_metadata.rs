use crate::protocol::encoding::Decoder;
use crate::protocol::parts::TypeId;
use crate::HdbResult;
use std::collections::BTreeMap;
use std::ops::Deref;

/// Metadata of a single result-set column.
#[derive(Clone, Debug)]
pub struct FieldMetadata {
    column_options: u8,
    type_id: TypeId,
    scale: i16,
    precision: i16,
    tablename: String,
    schemaname: String,
    columnname: String,
    displayname: String,
}

impl FieldMetadata {
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
    pub fn is_nullable(&self) -> bool {
        (self.column_options & 0b_0000_0010_u8) != 0
    }
    pub fn scale(&self) -> i16 {
        self.scale
    }
    pub fn precision(&self) -> i16 {
        self.precision
    }
    pub fn tablename(&self) -> &str {
        &self.tablename
    }
    pub fn schemaname(&self) -> &str {
        &self.schemaname
    }
    pub fn columnname(&self) -> &str {
        &self.columnname
    }
    pub fn displayname(&self) -> &str {
        &self.displayname
    }
}

/// List of metadata of the fields of a result set.
///
/// Derefs to the contained `Vec<FieldMetadata>` for index access.
#[derive(Debug, Default)]
pub struct ResultSetMetadata(Vec<FieldMetadata>);

impl Deref for ResultSetMetadata {
    type Target = Vec<FieldMetadata>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ResultSetMetadata {
    pub(crate) fn parse<R: std::io::Read>(count: usize, dec: &mut Decoder<R>) -> HdbResult<Self> {
        let mut records = Vec::with_capacity(count);
        let mut name_offsets = BTreeMap::<u32, String>::new();

        trace!("ResultSetMetadata::parse() with count = {count}");
        for _ in 0..count {
            // 24 bytes each
            let column_options = dec.u8();
            let type_code = dec.u8();
            let scale = dec.i16();
            let precision = dec.i16();
            dec.i16(); // filler
            let tablename_idx = dec.u32();
            let schemaname_idx = dec.u32();
            let columnname_idx = dec.u32();
            let displayname_idx = dec.u32();
            for idx in [tablename_idx, schemaname_idx, columnname_idx, displayname_idx] {
                if idx != u32::MAX {
                    name_offsets.entry(idx).or_default();
                }
            }
            records.push((
                column_options,
                type_code,
                scale,
                precision,
                [tablename_idx, schemaname_idx, columnname_idx, displayname_idx],
            ));
        }
        dec.check()?;

        // the name blob follows: one length-prefixed name per referenced offset
        let mut offset = 0_u32;
        for _ in 0..name_offsets.len() {
            let nl = dec.u8();
            let name = dec.string(nl as usize);
            trace!("offset = {offset}, name = {name}");
            name_offsets.insert(offset, name);
            offset += u32::from(nl) + 1;
        }
        dec.check()?;

        let resolve = |idx: u32| {
            if idx == u32::MAX {
                String::new()
            } else {
                name_offsets.get(&idx).cloned().unwrap_or_default()
            }
        };

        Ok(Self(
            records
                .into_iter()
                .map(
                    |(column_options, type_code, scale, precision, idxs)| -> HdbResult<_> {
                        Ok(FieldMetadata {
                            column_options,
                            type_id: TypeId::try_new(type_code)?,
                            scale,
                            precision,
                            tablename: resolve(idxs[0]),
                            schemaname: resolve(idxs[1]),
                            columnname: resolve(idxs[2]),
                            displayname: resolve(idxs[3]),
                        })
                    },
                )
                .collect::<HdbResult<Vec<FieldMetadata>>>()?,
        ))
    }
}

impl std::fmt::Display for ResultSetMetadata {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(fmt)?;
        for field_metadata in &self.0 {
            write!(fmt, "{}, ", field_metadata.displayname())?;
        }
        writeln!(fmt)
    }
}
