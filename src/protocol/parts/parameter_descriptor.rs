use crate::protocol::encoding::Decoder;
use crate::protocol::parts::TypeId;
use crate::{HdbError, HdbResult};

/// Describes a set of IN, INOUT, and OUT parameters. Can be empty.
#[derive(Debug, Default)]
pub struct ParameterDescriptors(Vec<ParameterDescriptor>);

impl ParameterDescriptors {
    /// Produces an iterator over the IN and INOUT parameters.
    pub fn iter_in(&self) -> impl std::iter::Iterator<Item = &ParameterDescriptor> {
        self.0.iter().filter(|d| {
            (d.direction == ParameterDirection::IN) | (d.direction == ParameterDirection::INOUT)
        })
    }

    /// Produces an iterator over the INOUT and OUT parameters.
    pub fn iter_out(&self) -> impl std::iter::Iterator<Item = &ParameterDescriptor> {
        self.0.iter().filter(|d| {
            (d.direction == ParameterDirection::OUT) | (d.direction == ParameterDirection::INOUT)
        })
    }

    /// Returns true if at least one IN or INOUT parameter is contained.
    pub fn has_in(&self) -> bool {
        self.iter_in().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a descriptor list without server involvement.
    /// Mainly useful for tests and tooling; real descriptor lists come in
    /// parameter-metadata parts.
    pub fn from_descriptors(descriptors: Vec<ParameterDescriptor>) -> Self {
        Self(descriptors)
    }

    pub(crate) fn parse<R: std::io::Read>(count: usize, dec: &mut Decoder<R>) -> HdbResult<Self> {
        let mut vec_pd = Vec::<ParameterDescriptor>::with_capacity(count);
        let mut name_offsets = Vec::<u32>::with_capacity(count);
        for _ in 0..count {
            // 16 bytes each
            let parameter_options = dec.u8();
            let type_code = dec.u8();
            let direction = ParameterDirection::from_u8(dec.u8())?;
            dec.u8(); // filler
            name_offsets.push(dec.u32());
            let precision = dec.i16();
            let scale = dec.i16();
            dec.u32(); // filler
            vec_pd.push(ParameterDescriptor::try_new(
                parameter_options,
                type_code,
                direction,
                precision,
                scale,
            )?);
        }
        // read the parameter names
        for (descriptor, name_offset) in vec_pd.iter_mut().zip(name_offsets.iter()) {
            if *name_offset != u32::MAX {
                let length = dec.u8();
                descriptor.name = Some(dec.string(length as usize));
            }
        }
        dec.check()?;
        Ok(Self(vec_pd))
    }
}

impl std::ops::Index<usize> for ParameterDescriptors {
    type Output = ParameterDescriptor;
    fn index(&self, index: usize) -> &Self::Output {
        self.0.index(index)
    }
}

/// Metadata for a single parameter.
#[derive(Clone, Debug)]
pub struct ParameterDescriptor {
    name: Option<String>,
    type_id: TypeId,
    nullable: bool,
    has_default: bool,
    scale: i16,
    precision: i16,
    direction: ParameterDirection,
}

impl ParameterDescriptor {
    fn try_new(
        parameter_options: u8,
        type_code: u8,
        direction: ParameterDirection,
        precision: i16,
        scale: i16,
    ) -> HdbResult<Self> {
        Ok(Self {
            name: None,
            type_id: TypeId::try_new(type_code)?,
            nullable: (parameter_options & 0b_0000_0010) != 0,
            has_default: (parameter_options & 0b_0000_0100) != 0,
            scale,
            precision,
            direction,
        })
    }

    /// Builds a descriptor without server involvement (tests and tooling).
    pub fn new_in(type_id: TypeId, nullable: bool) -> Self {
        Self {
            name: None,
            type_id,
            nullable,
            has_default: false,
            scale: 0,
            precision: 0,
            direction: ParameterDirection::IN,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
    pub fn has_default(&self) -> bool {
        self.has_default
    }
    pub fn scale(&self) -> i16 {
        self.scale
    }
    pub fn precision(&self) -> i16 {
        self.precision
    }
    pub fn direction(&self) -> ParameterDirection {
        self.direction
    }
}

/// Describes whether a parameter is used for input, output, or both.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParameterDirection {
    /// Input parameter.
    IN, // 1
    /// Input and output parameter.
    INOUT, // 2
    /// Output parameter.
    OUT, // 4
}

impl ParameterDirection {
    fn from_u8(v: u8) -> HdbResult<Self> {
        match v {
            1 => Ok(Self::IN),
            2 => Ok(Self::INOUT),
            4 => Ok(Self::OUT),
            _ => Err(HdbError::ImplDetailed(format!(
                "invalid value for ParameterDirection: {v}"
            ))),
        }
    }
}
